//! Locally-run abstractive summarization via candle.
//!
//! Loads a distilled seq2seq summarization checkpoint from the Hugging
//! Face Hub once at construction (multi-second; never per call) and
//! generates with deterministic beam search. Device placement is chosen
//! once and fixed for the object's lifetime.

use std::sync::Mutex;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;
use tracing::info;

use crate::error::{InsightError, InsightResult};
use crate::insight::{SummaryModel, SummaryParams};

/// Default pretrained artifact: a T5-small checkpoint fine-tuned for
/// abstractive summarization.
pub const DEFAULT_MODEL_ID: &str = "Falconsai/text_summarization";

const BEAM_WIDTH: usize = 4;

/// Candle-backed summarizer.
///
/// The model weights are immutable after load; the interior mutex only
/// guards the decoder KV cache, so concurrent calls serialize at the
/// device. That is acceptable backpressure, not a correctness issue.
pub struct T5Summarizer {
    model: Mutex<t5::T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    config: t5::Config,
    device: Device,
    model_id: String,
}

impl T5Summarizer {
    /// Load the default checkpoint.
    pub fn new() -> InsightResult<Self> {
        Self::from_pretrained(DEFAULT_MODEL_ID)
    }

    /// Load a named pretrained artifact from the Hub.
    pub fn from_pretrained(model_id: &str) -> InsightResult<Self> {
        let load_err = |reason: String| InsightError::ModelLoad {
            name: model_id.to_string(),
            reason,
        };

        let device = if candle_core::utils::cuda_is_available() {
            Device::new_cuda(0).map_err(|e| load_err(e.to_string()))?
        } else {
            Device::Cpu
        };
        info!(model = model_id, device = ?device, "loading summarization model");

        let api = Api::new().map_err(|e| load_err(e.to_string()))?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            "main".to_string(),
        ));

        let config_path = repo.get("config.json").map_err(|e| load_err(e.to_string()))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err(e.to_string()))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_err(e.to_string()))?;

        let config_str =
            std::fs::read_to_string(&config_path).map_err(|e| load_err(e.to_string()))?;
        let config: t5::Config =
            serde_json::from_str(&config_str).map_err(|e| load_err(e.to_string()))?;

        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_err(e.to_string()))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| load_err(e.to_string()))?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| load_err(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            model_id: model_id.to_string(),
        })
    }

    fn model_err(e: impl std::error::Error + Send + Sync + 'static) -> InsightError {
        InsightError::Model(Box::new(e))
    }

    /// Reduce decoder logits to the last-step vocabulary distribution.
    fn last_step_logits(logits: Tensor) -> candle_core::Result<Tensor> {
        let logits = if logits.dims().len() == 3 {
            logits.squeeze(0)?
        } else {
            logits
        };
        if logits.dims().len() == 2 {
            logits.get(logits.dim(0)? - 1)
        } else {
            Ok(logits)
        }
    }

    fn generate(&self, text: &str, params: &SummaryParams) -> InsightResult<String> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InsightError::Model(e.to_string().into()))?;

        // Silent truncation to the input budget; the model only ever sees
        // the first `input_token_budget` tokens.
        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();
        input_ids.truncate(params.input_token_budget);

        let input = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(Self::model_err)?;

        let eos = self.config.eos_token_id as u32;
        let start = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;

        let mut model = self
            .model
            .lock()
            .map_err(|_| InsightError::Model("summarizer mutex poisoned".into()))?;
        model.clear_kv_cache();
        let encoder_output = model.encode(&input).map_err(Self::model_err)?;

        let mut beams = vec![Beam {
            tokens: vec![start],
            score: 0.0,
            finished: false,
        }];

        for step in 0..params.max_length {
            if beams.iter().all(|b| b.finished) {
                break;
            }

            let mut next: Vec<Beam> = beams.iter().filter(|b| b.finished).cloned().collect();
            for beam in beams.iter().filter(|b| !b.finished) {
                // The KV cache is per-sequence; with several live beams the
                // full prefix is re-fed each step instead.
                model.clear_kv_cache();
                let decoder_ids = Tensor::new(beam.tokens.as_slice(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(Self::model_err)?;
                let logits = model
                    .decode(&decoder_ids, &encoder_output)
                    .and_then(Self::last_step_logits)
                    .map_err(Self::model_err)?;
                let log_probs = candle_nn::ops::log_softmax(&logits, 0)
                    .and_then(|t| t.to_vec1::<f32>())
                    .map_err(Self::model_err)?;

                for (token, log_prob) in top_k(&log_probs, BEAM_WIDTH) {
                    // No EOS before the minimum length.
                    if token == eos && step < params.min_length {
                        continue;
                    }
                    let mut tokens = beam.tokens.clone();
                    tokens.push(token);
                    next.push(Beam {
                        tokens,
                        score: beam.score + f64::from(log_prob),
                        finished: token == eos,
                    });
                }
            }

            next.sort_by(|a, b| {
                b.normalized_score()
                    .partial_cmp(&a.normalized_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            next.truncate(BEAM_WIDTH);
            beams = next;
        }

        let best = beams
            .iter()
            .max_by(|a, b| {
                a.normalized_score()
                    .partial_cmp(&b.normalized_score())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| InsightError::Model("beam search produced no candidates".into()))?;

        let output: Vec<u32> = best
            .tokens
            .iter()
            .copied()
            .filter(|&t| t != start && t != eos)
            .collect();
        self.tokenizer
            .decode(&output, true)
            .map(|s| s.trim().to_string())
            .map_err(|e| InsightError::Model(e.to_string().into()))
    }
}

#[derive(Debug, Clone)]
struct Beam {
    tokens: Vec<u32>,
    score: f64,
    finished: bool,
}

impl Beam {
    fn normalized_score(&self) -> f64 {
        self.score / self.tokens.len() as f64
    }
}

/// Top-k token indices by log-probability.
fn top_k(log_probs: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut indexed: Vec<(u32, f32)> = log_probs
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as u32, p))
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);
    indexed
}

#[async_trait]
impl SummaryModel for T5Summarizer {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> InsightResult<String> {
        self.generate(text, params)
    }

    fn name(&self) -> &str {
        &self.model_id
    }
}
