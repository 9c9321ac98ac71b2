//! The multiplexer: a priority-ordered conditional chain over a selector.
//!
//! Ports are the data inputs `in0..in<n-1>`, then `SELECT`, then `EN` when
//! an enable is configured; the single output is `out0`. With an enable the
//! chain drives the temporary `CHOSEN`, and `out0` is `CHOSEN` while `EN` is
//! at its active level and high impedance otherwise.

use serde::{Deserialize, Serialize};
use vcg_common::{bit_length, minimal_selector_width, Logic};
use vcg_ir::{
    Block, BlockBehavior, BlockLayout, CondBranch, ConcurrentStmt, Expr, GenerateError, PortSpec,
};

use crate::error::BlockConfigError;

/// Registry identifier of the multiplexer.
pub const MUX_TYPE_ID: &str = "multiplexer";

/// The name given to an unnamed multiplexer block.
pub const MUX_BLOCK_NAME: &str = "Multiplexer";

/// How the selector width is derived from the input count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorWidth {
    /// Just enough bits to encode the largest input index (at least 1).
    #[default]
    Minimal,
    /// The bit length of the input count itself; one bit wider than needed
    /// for exact powers of two.
    BitLength,
}

impl SelectorWidth {
    /// Returns the selector width for a multiplexer with `inputs` inputs.
    pub fn width(self, inputs: u32) -> u32 {
        match self {
            SelectorWidth::Minimal => minimal_selector_width(inputs),
            SelectorWidth::BitLength => bit_length(inputs).max(1),
        }
    }
}

/// A multiplexer block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplexer {
    inputs: u32,
    width: u32,
    default: Logic,
    enable: Option<Logic>,
    selector_width: u32,
}

impl Multiplexer {
    /// The smallest supported input count.
    pub const MIN_INPUTS: u32 = 2;

    /// Creates a multiplexer.
    ///
    /// `default` is the output when no select value matches and must be `0`,
    /// `1`, or `Z`. `enable` is the active level of the enable input, if one
    /// is wanted, and must be `0` or `1`.
    pub fn new(
        inputs: u32,
        width: u32,
        default: Logic,
        enable: Option<Logic>,
        selector: SelectorWidth,
    ) -> Result<Self, BlockConfigError> {
        if inputs < Self::MIN_INPUTS {
            return Err(BlockConfigError::TooFewInputs {
                type_id: MUX_TYPE_ID.to_string(),
                min: Self::MIN_INPUTS,
                got: inputs,
            });
        }
        if width == 0 {
            return Err(BlockConfigError::ZeroWidth {
                type_id: MUX_TYPE_ID.to_string(),
            });
        }
        if default == Logic::X {
            return Err(BlockConfigError::UnsupportedDefault {
                symbol: default.to_string(),
            });
        }
        if let Some(active) = enable.filter(|level| !level.is_level()) {
            return Err(BlockConfigError::UnsupportedActiveLevel {
                symbol: active.to_string(),
            });
        }
        Ok(Self {
            inputs,
            width,
            default,
            enable,
            selector_width: selector.width(inputs),
        })
    }

    /// Returns the number of data inputs.
    pub fn inputs(&self) -> u32 {
        self.inputs
    }

    /// Returns the data width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the width of the `SELECT` input.
    pub fn selector_width(&self) -> u32 {
        self.selector_width
    }

    /// Returns the enable active level, if the multiplexer has an enable.
    pub fn enable(&self) -> Option<Logic> {
        self.enable
    }

    fn select_index(&self) -> usize {
        self.inputs as usize
    }
}

impl BlockBehavior for Multiplexer {
    fn type_id(&self) -> &str {
        MUX_TYPE_ID
    }

    fn layout(&self) -> BlockLayout {
        let mut inputs: Vec<PortSpec> = (0..self.inputs)
            .map(|_| PortSpec::anonymous(self.width))
            .collect();
        inputs.push(PortSpec::named("SELECT", self.selector_width));
        let mut temporaries = Vec::new();
        if self.enable.is_some() {
            inputs.push(PortSpec::named("EN", 1));
            temporaries.push(PortSpec::named("CHOSEN", self.width));
        }
        BlockLayout {
            inputs,
            outputs: vec![PortSpec::anonymous(self.width)],
            temporaries,
        }
    }

    fn generate(&self, block: &Block) -> Result<Vec<ConcurrentStmt>, GenerateError> {
        let select = block.input_signal(self.select_index())?;
        let branches = (0..self.inputs)
            .map(|i| -> Result<CondBranch, GenerateError> {
                let data = block.input_signal(i as usize)?;
                Ok(CondBranch {
                    value: Expr::signal(data.name),
                    condition: Expr::eq(
                        Expr::signal(select.name.as_str()),
                        Expr::Binary {
                            value: i,
                            width: self.selector_width,
                        },
                    ),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fallback = Expr::Fill {
            symbol: self.default,
            width: self.width,
        };
        let output = block.output_signal(0)?;

        let Some(active) = self.enable else {
            return Ok(vec![ConcurrentStmt::Conditional {
                target: output.name,
                branches,
                otherwise: fallback,
            }]);
        };

        let chosen = block.temporary_signal(0)?;
        let enable = block.input_signal(self.select_index() + 1)?;
        Ok(vec![
            ConcurrentStmt::Conditional {
                target: chosen.name.clone(),
                branches,
                otherwise: fallback,
            },
            ConcurrentStmt::Conditional {
                target: output.name,
                branches: vec![CondBranch {
                    value: Expr::signal(chosen.name),
                    condition: Expr::eq(
                        Expr::signal(enable.name),
                        Expr::Fill {
                            symbol: active,
                            width: 1,
                        },
                    ),
                }],
                otherwise: Expr::Fill {
                    symbol: Logic::Z,
                    width: self.width,
                },
            },
        ])
    }
}
