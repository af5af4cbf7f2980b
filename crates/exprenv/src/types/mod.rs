mod handle;
mod value;

pub use handle::Handle;
pub use value::Value;
