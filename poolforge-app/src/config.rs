use anyhow::{Context, Result};
use poolforge_core::{chlorine, standards};
use poolforge_schemas::{
    chlorine::ChlorineProduct,
    file_formats::{ChlorineProductFile, GoldenNumbersFile, StandardsFile},
    standards::RegionStandards,
    water::{PoolType, Targets},
};
use std::{collections::HashMap, fs, path::Path};
use tracing::{debug, info};

/// Static reference data loaded from YAML: golden numbers, regional standards and
/// chlorine products.
#[derive(Debug)]
pub struct ReferenceTables {
    pub golden_numbers: HashMap<PoolType, Targets>,
    pub regions: Vec<RegionStandards>,
    pub chlorine_products: Vec<ChlorineProduct>,
}

impl ReferenceTables {
    /// Loads all tables from the specified base directory.
    pub fn load<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref();
        info!(path = %base_path.display(), "loading reference tables");

        let golden_numbers = load_yaml_items(
            base_path.join("1_golden_numbers"),
            |file: GoldenNumbersFile| file.golden_numbers,
        )?
        .into_iter()
        .map(|g| (g.pool_type, g.targets))
        .collect();
        let regions = load_yaml_items(base_path.join("2_standards"), |file: StandardsFile| {
            file.regions
        })?;
        let chlorine_products = load_yaml_items(
            base_path.join("3_chlorine_products"),
            |file: ChlorineProductFile| file.chlorine_products,
        )?;

        let tables = Self {
            golden_numbers,
            regions,
            chlorine_products,
        };
        info!(
            golden_numbers = tables.golden_numbers.len(),
            regions = tables.regions.len(),
            chlorine_products = tables.chlorine_products.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    pub fn golden_numbers(&self, pool_type: PoolType) -> Targets {
        self.golden_numbers
            .get(&pool_type)
            .copied()
            .unwrap_or_else(|| pool_type.golden_numbers())
    }

    pub fn region(&self, name: &str) -> Result<&RegionStandards> {
        Ok(standards::find_region(&self.regions, name)?)
    }

    pub fn chlorine_product(&self, product_id: &str) -> Result<&ChlorineProduct> {
        Ok(chlorine::find_product(&self.chlorine_products, product_id)?)
    }
}

/// Reads every YAML file in `dir_path`, in file name order, and concatenates the items
/// each wrapper holds.
fn load_yaml_items<P, F, E, T>(dir_path: P, extract_vec: E) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., StandardsFile)
    E: Fn(F) -> Vec<T>,
{
    let dir_path = dir_path.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory: {:?}", dir_path))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut items = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        let before = items.len();
        items.extend(extract_vec(file_wrapper));
        debug!(path = %path.display(), items = items.len() - before, "loaded reference file");
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, sub: &str, name: &str, body: &str) {
        let sub = dir.join(sub);
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(name), body).unwrap();
    }

    #[test]
    fn loads_tables_from_directories() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "1_golden_numbers",
            "golden.yaml",
            "schema_version: \"1.0\"\ngolden_numbers:\n  - pool_type: spa\n    ph: 7.4\n    alkalinity: 90\n    calcium: 250\n    cya: 0\n",
        );
        write(
            dir.path(),
            "2_standards",
            "standards.yaml",
            "schema_version: \"1.0\"\nregions: []\n",
        );
        write(
            dir.path(),
            "3_chlorine_products",
            "products.yml",
            "schema_version: \"1.0\"\nchlorine_products:\n  - product_id: cal-hypo-68\n    name: Cal Hypo 68%\n    kind: cal-hypo\n    concentration: 0.68\n",
        );
        write(dir.path(), "3_chlorine_products", "README.txt", "ignored");

        let tables = ReferenceTables::load(dir.path()).unwrap();
        assert_eq!(tables.golden_numbers(PoolType::Spa).ph, 7.4);
        assert_eq!(tables.golden_numbers(PoolType::Pool), PoolType::Pool.golden_numbers());
        assert_eq!(tables.chlorine_product("cal-hypo-68").unwrap().concentration, 0.68);
        assert!(tables.region("Florida").is_err());
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempdir().unwrap();
        let err = ReferenceTables::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("1_golden_numbers"));
    }

    #[test]
    fn shipped_reference_data_parses() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/reference");
        let tables = ReferenceTables::load(base).unwrap();
        assert_eq!(tables.golden_numbers(PoolType::Pool), PoolType::Pool.golden_numbers());
        assert_eq!(tables.golden_numbers(PoolType::Spa), PoolType::Spa.golden_numbers());
        assert!(tables.region("texas").is_ok());
        assert!(tables.region("New York City").is_ok());
        assert!(tables.chlorine_product("liquid-12.5").is_ok());
        assert_eq!(tables.chlorine_products.len(), 4);
    }
}
