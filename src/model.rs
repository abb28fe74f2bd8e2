//! Local T5 inference for query rewriting.
//!
//! Downloads model files from the Hugging Face hub (honouring an explicit
//! cache directory when one is configured) and runs greedy seq2seq generation
//! on CPU with candle.

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;
use hf_hub::api::sync::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;
use thiserror::Error;
use tokenizers::Tokenizer;

/// Hard cap on encoder input length when truncation is requested
const MAX_INPUT_TOKENS: usize = 512;

/// Fixed seed; sampling is greedy so this only seeds the tie-breaking RNG
const GENERATION_SEED: u64 = 299792458;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to download model files: {0}")]
    Hub(#[from] hf_hub::api::sync::ApiError),
    #[error("failed to read model files: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
    #[error("inference error: {0}")]
    Inference(#[from] candle_core::Error),
}

/// Where to find the rewriter model
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Hugging Face model identifier
    pub model_id: String,
    /// Explicit hub cache directory; `None` uses the default hub cache
    pub cache_dir: Option<PathBuf>,
}

/// Generation parameters for a single call
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Maximum number of generated tokens
    pub max_new_tokens: usize,
    /// Truncate over-long inputs instead of failing
    pub truncate: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 64,
            truncate: true,
        }
    }
}

/// Tagged generation result.
///
/// Text extraction has a declared fallback order: `generated_text` first,
/// then `text`, then the empty string.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub generated_text: Option<String>,
    pub text: Option<String>,
}

impl Generation {
    /// Extract the generated text, trimmed; empty when neither field is set.
    pub fn into_text(self) -> String {
        self.generated_text
            .or(self.text)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

/// Seam between the rewriting logic and the inference backend.
pub trait TextGenerator {
    fn generate(
        &mut self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Generation, ModelError>;
}

/// Candle-backed T5 conditional generation.
pub struct T5Generator {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    config: t5::Config,
    device: Device,
}

impl T5Generator {
    /// Download (or reuse cached) model files and load the weights.
    pub fn load(options: &ModelOptions) -> Result<Self, ModelError> {
        let api = match &options.cache_dir {
            Some(dir) => ApiBuilder::new().with_cache_dir(dir.clone()).build()?,
            None => Api::new()?,
        };
        let repo = api.repo(Repo::with_revision(
            options.model_id.clone(),
            RepoType::Model,
            "main".to_string(),
        ));

        let config_file = repo.get("config.json")?;
        let tokenizer_file = repo.get("tokenizer.json")?;
        let weights_file = repo.get("model.safetensors")?;

        let config: t5::Config = serde_json::from_str(&std::fs::read_to_string(config_file)?)?;
        let tokenizer = Tokenizer::from_file(tokenizer_file)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        let device = Device::Cpu;
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_file], DType::F32, &device)? };
        let model = t5::T5ForConditionalGeneration::load(vb, &config)?;

        Ok(Self {
            model,
            tokenizer,
            config,
            device,
        })
    }
}

impl TextGenerator for T5Generator {
    fn generate(
        &mut self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Generation, ModelError> {
        self.model.clear_kv_cache();

        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;
        let mut input_ids = encoding.get_ids().to_vec();
        if options.truncate && input_ids.len() > MAX_INPUT_TOKENS {
            input_ids.truncate(MAX_INPUT_TOKENS);
        }

        let input = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input)?;

        let start_token = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let mut output_ids = vec![start_token];
        let mut logits_processor = LogitsProcessor::new(GENERATION_SEED, None, None);

        for step in 0..options.max_new_tokens {
            let decoder_input = if step == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output_ids[output_ids.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };
            let logits = self
                .model
                .decode(&decoder_input, &encoder_output)?
                .squeeze(0)?;
            let next = logits_processor.sample(&logits)?;
            if next as usize == self.config.eos_token_id {
                break;
            }
            output_ids.push(next);
        }

        let text = self
            .tokenizer
            .decode(&output_ids[1..], true)
            .map_err(|e| ModelError::Tokenizer(e.to_string()))?;

        Ok(Generation {
            generated_text: Some(text),
            text: None,
        })
    }
}
