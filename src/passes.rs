//! Repeated compression passes over the previous pass's output.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::block::CompressedBlock;
use crate::config::Config;
use crate::decompress::restore_bytes;
use crate::stats::SearchStats;
use crate::{compress_with, BitrunError};

/// What one pass changed; enough to undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Anchor bit offset within this pass's input.
    pub anchor: usize,
    pub input_len: usize,
    pub output_len: usize,
    /// Container size in bits before byte padding.
    pub cost_bits: usize,
}

impl Layer {
    fn from_block(block: &CompressedBlock, input_len: usize) -> Self {
        Self {
            anchor: block.anchor,
            input_len,
            output_len: block.data.len(),
            cost_bits: block.bit_len,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PassChain {
    /// Layers in the order they were applied.
    pub layers: Vec<Layer>,
    /// Output of the last pass, or the input when no pass applied.
    pub payload: Vec<u8>,
    pub stats: SearchStats,
}

impl PassChain {
    pub fn passes(&self) -> usize {
        self.layers.len()
    }

    /// Undo every layer, last first.
    pub fn unwind(&self) -> Result<Vec<u8>, BitrunError> {
        unwind_layers(&self.layers, &self.payload)
    }
}

pub fn unwind_layers(layers: &[Layer], payload: &[u8]) -> Result<Vec<u8>, BitrunError> {
    let mut current = payload.to_vec();
    for layer in layers.iter().rev() {
        if current.len() != layer.output_len {
            return Err(BitrunError::Container(format!(
                "layer expects {} bytes, found {}",
                layer.output_len,
                current.len()
            )));
        }
        current = restore_bytes(&current, layer.anchor)?;
        if current.len() != layer.input_len {
            return Err(BitrunError::Container(format!(
                "layer restored {} bytes, expected {}",
                current.len(),
                layer.input_len
            )));
        }
    }
    Ok(current)
}

pub fn compress_passes(input: &[u8], config: &Config) -> Result<PassChain, BitrunError> {
    compress_passes_with(input, config, |_, _| {})
}

/// Run up to `config.max_passes` passes, calling `on_pass` after each kept
/// pass. The chain ends early when nothing repeats, or when a pass does not
/// shrink its input and `config.require_gain` is set.
pub fn compress_passes_with<F>(
    input: &[u8],
    config: &Config,
    mut on_pass: F,
) -> Result<PassChain, BitrunError>
where
    F: FnMut(usize, &Layer),
{
    config.validate()?;
    let mut chain = PassChain {
        payload: input.to_vec(),
        ..PassChain::default()
    };

    for pass in 0..config.max_passes {
        let mut stats = SearchStats::new();
        let result = compress_with(&chain.payload, config.strategy, &mut stats);
        chain.stats.merge(&stats);
        let block = match result {
            Ok(block) => block,
            Err(BitrunError::NoRepeat) => {
                info!(pass, "no repeated run left");
                break;
            }
            Err(e) => return Err(e),
        };

        if config.require_gain && block.data.len() >= chain.payload.len() {
            warn!(
                pass,
                input_len = chain.payload.len(),
                output_len = block.data.len(),
                "pass did not shrink its input"
            );
            break;
        }

        let layer = Layer::from_block(&block, chain.payload.len());
        info!(
            pass,
            input_len = layer.input_len,
            output_len = layer.output_len,
            cost_bits = layer.cost_bits,
            "pass complete"
        );
        on_pass(pass, &layer);
        chain.layers.push(layer);
        chain.payload = block.into_bytes();
    }

    Ok(chain)
}
