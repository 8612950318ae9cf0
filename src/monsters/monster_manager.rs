use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::monster::SpeciesRecord;
use crate::errors::CatalogError;

/// Read-only source of species data consumed by team building
pub trait CatalogProvider: Send + Sync {
    fn species(&self, id: u32) -> Option<&SpeciesRecord>;

    /// Case-insensitive lookup by canonical name
    fn species_by_name(&self, name: &str) -> Option<&SpeciesRecord>;

    /// All records ordered by species id
    fn all_species(&self) -> Vec<&SpeciesRecord>;
}

/// Species catalog loaded from a JSON array of records
#[derive(Debug, Default)]
pub struct SpeciesRepository {
    species: HashMap<u32, SpeciesRecord>,
}

impl SpeciesRepository {
    pub fn from_records(records: Vec<SpeciesRecord>) -> Self {
        let mut species = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(previous) = species.insert(record.id, record) {
                warn!("Duplicate species id {} in catalog, keeping the later entry", previous.id);
            }
        }
        SpeciesRepository { species }
    }

    /// Load the catalog from the specified file path
    pub fn load(path: &str) -> Result<Arc<Self>, CatalogError> {
        let file = File::open(Path::new(path)).map_err(|source| CatalogError::Io {
            path: path.to_string(),
            source,
        })?;
        let reader = BufReader::new(file);
        let records: Vec<SpeciesRecord> =
            serde_json::from_reader(reader).map_err(|source| CatalogError::Parse {
                path: path.to_string(),
                source,
            })?;

        let repository = Self::from_records(records);
        info!("Loaded {} species from {}", repository.len(), path);
        Ok(Arc::new(repository))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl CatalogProvider for SpeciesRepository {
    fn species(&self, id: u32) -> Option<&SpeciesRecord> {
        self.species.get(&id)
    }

    fn species_by_name(&self, name: &str) -> Option<&SpeciesRecord> {
        self.species
            .values()
            .find(|record| record.name.eq_ignore_ascii_case(name))
    }

    fn all_species(&self) -> Vec<&SpeciesRecord> {
        let mut records: Vec<&SpeciesRecord> = self.species.values().collect();
        records.sort_by_key(|record| record.id);
        records
    }
}
