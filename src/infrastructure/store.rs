//! 记录存储
//!
//! 以集合为单位整体读写无类型记录。集合不存在或文件为空时读到空集合。

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::StorageConfig;

/// 一条扁平记录
pub type Record = Map<String, Value>;

/// 持久化的集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Customers,
    Shipments,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Products,
        Collection::Customers,
        Collection::Shipments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "produtos",
            Collection::Customers => "clientes",
            Collection::Shipments => "envios",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("读取集合 {collection} 失败: {source}")]
    Read {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    #[error("写入集合 {collection} 失败: {source}")]
    Write {
        collection: Collection,
        #[source]
        source: std::io::Error,
    },

    #[error("集合 {collection} 数据格式错误: {source}")]
    Parse {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("集合 {collection} 序列化失败: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

/// 存储后端
///
/// `save` 整体替换集合内容，调用方不会看到写了一半的数据。
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError>;

    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError>;
}

/// 每个集合一个 JSON 数组文件
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    products: PathBuf,
    customers: PathBuf,
    shipments: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StorageConfig) -> Self {
        let dir = &config.data_dir;
        Self {
            products: dir.join(&config.products_file),
            customers: dir.join(&config.customers_file),
            shipments: dir.join(&config.shipments_file),
        }
    }

    pub fn path(&self, collection: Collection) -> &Path {
        match collection {
            Collection::Products => self.products.as_path(),
            Collection::Customers => self.customers.as_path(),
            Collection::Shipments => self.shipments.as_path(),
        }
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        let path = self.path(collection);
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { collection, source }),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Parse { collection, source })
    }

    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError> {
        let path = self.path(collection);
        let content = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::Encode { collection, source })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write { collection, source })?;
        }

        // 先写临时文件再改名，读者只会看到完整的旧文件或新文件
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, content)
            .await
            .map_err(|source| StoreError::Write { collection, source })?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|source| StoreError::Write { collection, source })?;

        debug!("集合 {} 已写入 {} 条记录 -> {}", collection, records.len(), path.display());
        Ok(())
    }
}

/// 内存存储，用于测试和临时运行
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections.insert(collection, records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn store_in(dir: &Path) -> JsonFileStore {
        JsonFileStore::new(&StorageConfig {
            data_dir: dir.to_path_buf(),
            ..StorageConfig::default()
        })
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        for collection in Collection::ALL {
            assert!(store.load(collection).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_blank_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(dir.path().join("clientes.json"), "  \n").unwrap();

        assert!(store.load(Collection::Customers).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_whole_collection() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let first = vec![
            record(json!({"id": "1", "nome": "Ana", "endereco": "Rua A"})),
            record(json!({"id": "2", "nome": "Bia", "endereco": "Rua B"})),
        ];
        store.save(Collection::Customers, &first).await.unwrap();
        store.save(Collection::Customers, &first[1..]).await.unwrap();

        let loaded = store.load(Collection::Customers).await.unwrap();
        assert_eq!(loaded, first[1..].to_vec());
        assert!(!dir.path().join("clientes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_format_is_pretty_json_array() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .save(Collection::Products, &[record(json!({"id": "7", "nome": "Caneca"}))])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("produtos.json")).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": \"7\""));
    }

    #[tokio::test]
    async fn test_save_creates_data_dir() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir.path().join("dados"));

        store.save(Collection::Shipments, &[]).await.unwrap();
        assert!(dir.path().join("dados").join("envios.json").exists());
    }

    #[tokio::test]
    async fn test_corrupted_file_is_an_error() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(dir.path().join("envios.json"), "{ not json").unwrap();

        let err = store.load(Collection::Shipments).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { collection: Collection::Shipments, .. }));
    }

    #[tokio::test]
    async fn test_memory_store_keeps_collections_apart() {
        let store = MemoryStore::new();
        store
            .save(Collection::Products, &[record(json!({"id": "1"}))])
            .await
            .unwrap();

        assert_eq!(store.load(Collection::Products).await.unwrap().len(), 1);
        assert!(store.load(Collection::Customers).await.unwrap().is_empty());
    }
}
