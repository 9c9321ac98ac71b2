//! Errors raised while configuring a block.

use crate::params::ParamError;

/// A block could not be built from its parameters.
///
/// Raised before the block enters a system, so an invalid configuration
/// never reaches code generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockConfigError {
    /// The parameter list itself was malformed.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// No factory is registered under the requested type identifier.
    #[error("unknown block type `{0}`")]
    UnknownType(String),

    /// Fewer inputs than the block type supports.
    #[error("`{type_id}` needs at least {min} inputs, got {got}")]
    TooFewInputs {
        /// The block type.
        type_id: String,
        /// The minimum input count.
        min: u32,
        /// The requested input count.
        got: u32,
    },

    /// A data width of zero.
    #[error("`{type_id}` width must be at least 1")]
    ZeroWidth {
        /// The block type.
        type_id: String,
    },

    /// A default output symbol other than `0`, `1`, or `Z`.
    #[error("unsupported default output `{symbol}`; expected 0, 1 or Z")]
    UnsupportedDefault {
        /// The rejected symbol.
        symbol: String,
    },

    /// An enable active level other than `0` or `1`.
    #[error("unsupported enable level `{symbol}`; expected 0 or 1")]
    UnsupportedActiveLevel {
        /// The rejected symbol.
        symbol: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_too_few_inputs() {
        let err = BlockConfigError::TooFewInputs {
            type_id: "multiplexer".to_string(),
            min: 2,
            got: 1,
        };
        assert_eq!(err.to_string(), "`multiplexer` needs at least 2 inputs, got 1");
    }

    #[test]
    fn param_error_is_transparent() {
        let err: BlockConfigError = ParamError::Missing {
            name: "width".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "missing parameter `width`");
    }
}
