/// `CreateProcessW` caps `lpCommandLine` at 32,767 UTF-16 code units,
/// including the terminating NUL.
pub const MAX_COMMAND_LINE: usize = 32767;

pub const PRODUCT_NAME: &str = "dotslash-windows-shim";

pub const INTERPRETER: &str = "dotslash";

/// Fixed, compile-time shim settings.
///
/// Nothing here is read from files or the environment. The setters exist so
/// the library can be driven with other interpreters and limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShimConfig {
    pub product_name: String,
    pub interpreter: String,
    pub max_command_line: usize,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            product_name: PRODUCT_NAME.to_string(),
            interpreter: INTERPRETER.to_string(),
            max_command_line: MAX_COMMAND_LINE,
        }
    }
}

impl ShimConfig {
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    pub fn interpreter(mut self, name: impl Into<String>) -> Self {
        self.interpreter = name.into();
        self
    }

    pub fn max_command_line(mut self, max: usize) -> Self {
        self.max_command_line = max;
        self
    }
}
