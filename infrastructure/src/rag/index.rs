//! LanceDB-backed store of embedded regulation chunks

use super::error::IndexError;
use arrow_array::builder::{FixedSizeListBuilder, Float32Builder, StringBuilder};
use arrow_array::{Array, ArrayRef, Float32Array, RecordBatch, RecordBatchIterator, StringArray};
use arrow_schema::{DataType, Field, Schema};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{Connection, DistanceType, Table};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const TEXT_COLUMN: &str = "text";
const SOURCE_COLUMN: &str = "source";
const VECTOR_COLUMN: &str = "vector";
const DISTANCE_COLUMN: &str = "_distance";

/// One embedded chunk of regulation text
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub text: String,
    /// File name the chunk came from
    pub source: String,
    pub vector: Vec<f32>,
}

/// A search hit with its cosine similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub text: String,
    pub source: String,
    pub score: f32,
}

/// Embedded regulation chunks in a LanceDB table, searched by cosine distance
///
/// Each embedding model gets its own table in the database directory, so
/// switching models never mixes vector spaces.
pub struct VectorIndex {
    table: Table,
    model: String,
}

impl VectorIndex {
    /// Open the table for `model` under `path`
    ///
    /// Returns `None` when the table does not exist or holds no rows.
    pub async fn open(path: &Path, model: &str) -> Result<Option<Self>, IndexError> {
        if !path.is_dir() {
            return Ok(None);
        }
        let db = connect(path).await?;
        let name = table_name(model);
        if !db.table_names().execute().await?.contains(&name) {
            return Ok(None);
        }

        let table = db.open_table(&name).execute().await?;
        if table.count_rows(None).await? == 0 {
            return Ok(None);
        }
        Ok(Some(Self {
            table,
            model: model.to_string(),
        }))
    }

    /// Replace the table for `model` under `path` with `entries`
    pub async fn create(
        path: &Path,
        model: &str,
        entries: &[IndexEntry],
    ) -> Result<Self, IndexError> {
        let batch = entries_to_batch(entries)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| IndexError::io(path, e))?;
        let db = connect(path).await?;
        let name = table_name(model);

        let table = if db.table_names().execute().await?.contains(&name) {
            let table = db.open_table(&name).execute().await?;
            table.delete("true").await?;
            table.add(reader).execute().await?;
            table
        } else {
            db.create_table(&name, reader).execute().await?
        };

        Ok(Self {
            table,
            model: model.to_string(),
        })
    }

    /// Embedding model the vectors were produced with
    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn len(&self) -> Result<usize, IndexError> {
        Ok(self.table.count_rows(None).await?)
    }

    /// The `k` chunks nearest to `query`, best first
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>, IndexError> {
        let batches: Vec<RecordBatch> = self
            .table
            .query()
            .nearest_to(query)?
            .distance_type(DistanceType::Cosine)
            .limit(k)
            .execute()
            .await?
            .try_collect()
            .await?;

        let mut hits = Vec::new();
        for batch in &batches {
            hits.extend(batch_to_hits(batch)?);
        }
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        debug!(hits = hits.len(), model = %self.model, "Vector search");
        Ok(hits)
    }
}

async fn connect(path: &Path) -> Result<Connection, IndexError> {
    Ok(lancedb::connect(&path.to_string_lossy()).execute().await?)
}

/// Table name for an embedding model, e.g. `chunks_text_embedding_3_small`
fn table_name(model: &str) -> String {
    let sanitized: String = model
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("chunks_{sanitized}")
}

fn schema(dimension: i32) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(TEXT_COLUMN, DataType::Utf8, false),
        Field::new(SOURCE_COLUMN, DataType::Utf8, false),
        Field::new(
            VECTOR_COLUMN,
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                dimension,
            ),
            false,
        ),
    ]))
}

fn entries_to_batch(entries: &[IndexEntry]) -> Result<RecordBatch, IndexError> {
    let Some(first) = entries.first() else {
        return Err(IndexError::Empty);
    };
    let dimension = first.vector.len();
    if dimension == 0 {
        return Err(IndexError::Dimension {
            expected: 1,
            found: 0,
        });
    }
    let list_size = i32::try_from(dimension).map_err(|_| IndexError::Dimension {
        expected: i32::MAX as usize,
        found: dimension,
    })?;

    let mut text_builder = StringBuilder::new();
    let mut source_builder = StringBuilder::new();
    let mut vector_builder = FixedSizeListBuilder::new(Float32Builder::new(), list_size);

    for entry in entries {
        if entry.vector.len() != dimension {
            return Err(IndexError::Dimension {
                expected: dimension,
                found: entry.vector.len(),
            });
        }
        text_builder.append_value(&entry.text);
        source_builder.append_value(&entry.source);
        vector_builder.values().append_slice(&entry.vector);
        vector_builder.append(true);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(text_builder.finish()),
        Arc::new(source_builder.finish()),
        Arc::new(vector_builder.finish()),
    ];
    Ok(RecordBatch::try_new(schema(list_size), columns)?)
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a StringArray, IndexError> {
    batch
        .column_by_name(name)
        .and_then(|column| column.as_any().downcast_ref::<StringArray>())
        .ok_or(IndexError::Column(name))
}

fn batch_to_hits(batch: &RecordBatch) -> Result<Vec<ScoredChunk>, IndexError> {
    let texts = string_column(batch, TEXT_COLUMN)?;
    let sources = string_column(batch, SOURCE_COLUMN)?;
    let distances = batch
        .column_by_name(DISTANCE_COLUMN)
        .and_then(|column| column.as_any().downcast_ref::<Float32Array>())
        .ok_or(IndexError::Column(DISTANCE_COLUMN))?;

    Ok((0..batch.num_rows())
        .map(|row| ScoredChunk {
            text: texts.value(row).to_string(),
            source: sources.value(row).to_string(),
            // cosine distance is 1 - similarity
            score: if distances.is_null(row) {
                0.0
            } else {
                1.0 - distances.value(row)
            },
        })
        .collect())
}
