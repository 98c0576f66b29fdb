use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::ner::NERModel;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use rust_bert::pipelines::summarization::{SummarizationConfig, SummarizationModel};
use rust_bert::pipelines::token_classification::TokenClassificationConfig;
use rust_bert::resources::RemoteResource;
use rust_bert::t5::{T5ConfigResources, T5ModelResources, T5VocabResources};
use tch::Device;
use tracing::info;

use crate::error::{AnalyzerError, Result};
use crate::summarizer::{SUMMARY_MAX_LENGTH, SUMMARY_MIN_LENGTH};

pub trait Embedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

pub trait EntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>>;
}

pub trait Summarizer {
    fn summarize(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Product,
    Person,
    Location,
    Other,
}

impl EntityKind {
    // CoNLL-03 has no product tag; product names land in MISC
    pub fn from_label(label: &str) -> Self {
        let bare = label
            .strip_prefix("B-")
            .or_else(|| label.strip_prefix("I-"))
            .unwrap_or(label);
        match bare.to_uppercase().as_str() {
            "ORG" => EntityKind::Organization,
            "PRODUCT" | "MISC" => EntityKind::Product,
            "PER" | "PERSON" => EntityKind::Person,
            "LOC" | "GPE" => EntityKind::Location,
            _ => EntityKind::Other,
        }
    }

    pub fn is_skill_hint(self) -> bool {
        matches!(self, EntityKind::Organization | EntityKind::Product)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntity {
    pub text: String,
    pub kind: EntityKind,
}

pub struct BertEmbedder {
    model: SentenceEmbeddingsModel,
}

impl BertEmbedder {
    pub fn new(device: Device) -> Result<Self> {
        let model = SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL6V2)
            .with_device(device)
            .create_model()?;
        Ok(Self { model })
    }
}

impl Embedder for BertEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.model
            .encode(&[text])?
            .into_iter()
            .next()
            .ok_or(AnalyzerError::EmptyModelOutput("sentence embedding"))
    }
}

pub struct BertEntityRecognizer {
    model: NERModel,
}

impl BertEntityRecognizer {
    pub fn new(device: Device) -> Result<Self> {
        let config = TokenClassificationConfig {
            device,
            ..Default::default()
        };
        Ok(Self {
            model: NERModel::new(config)?,
        })
    }
}

impl EntityRecognizer for BertEntityRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<NamedEntity>> {
        let entities = self
            .model
            .predict_full_entities(&[text])
            .into_iter()
            .next()
            .ok_or(AnalyzerError::EmptyModelOutput("named entity recognition"))?;

        Ok(entities
            .into_iter()
            .map(|entity| NamedEntity {
                kind: EntityKind::from_label(&entity.label),
                text: entity.word,
            })
            .collect())
    }
}

pub struct T5Summarizer {
    model: SummarizationModel,
}

impl T5Summarizer {
    pub fn new(device: Device) -> Result<Self> {
        let config = SummarizationConfig {
            min_length: SUMMARY_MIN_LENGTH,
            max_length: Some(SUMMARY_MAX_LENGTH),
            do_sample: false,
            device,
            ..SummarizationConfig::new(
                ModelType::T5,
                ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
                    T5ModelResources::T5_SMALL,
                ))),
                RemoteResource::from_pretrained(T5ConfigResources::T5_SMALL),
                RemoteResource::from_pretrained(T5VocabResources::T5_SMALL),
                None,
            )
        };
        Ok(Self {
            model: SummarizationModel::new(config)?,
        })
    }
}

impl Summarizer for T5Summarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        self.model
            .summarize(&[text])?
            .into_iter()
            .next()
            .ok_or(AnalyzerError::EmptyModelOutput("summarization"))
    }
}

pub struct ModelSet {
    pub embedder: Box<dyn Embedder>,
    pub recognizer: Box<dyn EntityRecognizer>,
    pub summarizer: Box<dyn Summarizer>,
}

impl ModelSet {
    pub fn load(device: Device) -> Result<Self> {
        info!("Loading sentence embedding model on {:?}...", device);
        let embedder = BertEmbedder::new(device)?;
        info!("Loading named entity recognition model...");
        let recognizer = BertEntityRecognizer::new(device)?;
        info!("Loading summarization model...");
        let summarizer = T5Summarizer::new(device)?;
        info!("Models ready");

        Ok(Self {
            embedder: Box::new(embedder),
            recognizer: Box::new(recognizer),
            summarizer: Box::new(summarizer),
        })
    }
}
