mod builtins;
mod conditioner;
mod values;

pub use builtins::{call_method, get_method, method_names};
pub use conditioner::{
    clear_conditioner, construct, default_conditioner, has_conditioner,
    install_default_conditioner, set_conditioner, Conditioner,
};
pub use values::{format_value, BuiltinImpl, Handle, RuntimeError, Value};

pub type R = Result<Value, RuntimeError>;
