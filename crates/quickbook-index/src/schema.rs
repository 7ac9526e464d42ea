//! The fixed k-NN index body sent to the search collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Embedding width produced by the ingestion pipeline's embedding model.
pub const VECTOR_DIMENSION: u32 = 1536;

pub const EMBEDDING_FIELD: &str = "embedding";
pub const CONTENT_FIELD: &str = "content";
pub const METADATA_FIELD: &str = "metadata";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexBody {
    pub settings: IndexSettings,
    pub mappings: Mappings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(rename = "index.knn")]
    pub knn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    pub properties: BTreeMap<String, FieldMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldMapping {
    KnnVector { dimension: u32, method: KnnMethod },
    Text,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnMethod {
    pub engine: KnnEngine,
    pub name: KnnAlgorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnnEngine {
    Faiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnnAlgorithm {
    Hnsw,
}

impl IndexBody {
    /// Textbook chunk index: HNSW/FAISS vector field, chunk text, free-form metadata.
    #[must_use]
    pub fn textbook() -> Self {
        let properties = BTreeMap::from([
            (
                EMBEDDING_FIELD.to_owned(),
                FieldMapping::KnnVector {
                    dimension: VECTOR_DIMENSION,
                    method: KnnMethod {
                        engine: KnnEngine::Faiss,
                        name: KnnAlgorithm::Hnsw,
                    },
                },
            ),
            (CONTENT_FIELD.to_owned(), FieldMapping::Text),
            (METADATA_FIELD.to_owned(), FieldMapping::Object),
        ]);

        Self {
            settings: IndexSettings { knn: true },
            mappings: Mappings { properties },
        }
    }
}
