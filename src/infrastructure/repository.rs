//! 实体仓储
//!
//! 在 [`RecordStore`] 之上按实体类型读写。集合中的记录保持无类型，
//! 只有新建或替换的那一条经过实体类型编码，其余记录原样写回。
//! 每次操作都重新读取集合，写操作在整个 读取→修改→写回 过程中持有该集合的锁。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::ids::IdGenerator;
use super::store::{Collection, Record, RecordStore, StoreError};

/// 生成 ID 时遇到已存在 ID 的最大重试次数
const MAX_ID_ATTEMPTS: usize = 16;

/// 可持久化的实体字段
pub trait Entity: Serialize + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
}

/// 带 ID 的已存储实体，序列化时 `id` 与字段平铺在同一层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{collection} 中不存在记录 {id}")]
    NotFound { collection: Collection, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("集合 {collection} 的记录无法编码: {reason}")]
    Encode {
        collection: Collection,
        reason: String,
    },

    #[error("集合 {0} 无法生成唯一 ID")]
    IdExhausted(Collection),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 记录的 `id` 是否等于给定的字符串，非字符串的 `id` 不匹配任何路径参数
fn has_id(record: &Record, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

pub struct Repository<T> {
    store: Arc<dyn RecordStore>,
    ids: Arc<dyn IdGenerator>,
    write_lock: Arc<Mutex<()>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            write_lock: Arc::clone(&self.write_lock),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    /// 同一集合只应创建一个仓储，其克隆共享写锁
    pub fn new(store: Arc<dyn RecordStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            write_lock: Arc::new(Mutex::new(())),
            _entity: PhantomData,
        }
    }

    /// 按存储中的原样返回全部记录
    pub async fn list(&self) -> RepositoryResult<Vec<Record>> {
        Ok(self.store.load(T::COLLECTION).await?)
    }

    pub async fn get(&self, id: &str) -> RepositoryResult<Record> {
        self.list()
            .await?
            .into_iter()
            .find(|record| has_id(record, id))
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn create(&self, fields: T) -> RepositoryResult<Stored<T>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        let stored = Stored {
            id: self.fresh_id(&records)?,
            fields,
        };
        records.push(encode(&stored)?);
        self.store.save(T::COLLECTION, &records).await?;

        info!("{} 新增记录 {}", T::COLLECTION, stored.id);
        Ok(stored)
    }

    /// 整体替换，只保留 ID，其他记录不变
    pub async fn replace(&self, id: &str, fields: T) -> RepositoryResult<Stored<T>> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        let slot = records
            .iter_mut()
            .find(|record| has_id(record, id))
            .ok_or_else(|| not_found::<T>(id))?;
        let stored = Stored {
            id: id.to_string(),
            fields,
        };
        *slot = encode(&stored)?;
        self.store.save(T::COLLECTION, &records).await?;

        info!("{} 更新记录 {}", T::COLLECTION, id);
        Ok(stored)
    }

    pub async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;

        let before = records.len();
        records.retain(|record| !has_id(record, id));
        if records.len() == before {
            return Err(not_found::<T>(id));
        }
        self.store.save(T::COLLECTION, &records).await?;

        info!("{} 删除记录 {}", T::COLLECTION, id);
        Ok(())
    }

    fn fresh_id(&self, records: &[Record]) -> RepositoryResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if !id.is_empty() && !records.iter().any(|record| has_id(record, &id)) {
                return Ok(id);
            }
            debug!("{} 生成的 ID {:?} 不可用，重新生成", T::COLLECTION, id);
        }
        Err(RepositoryError::IdExhausted(T::COLLECTION))
    }
}

fn encode<T: Entity>(stored: &Stored<T>) -> RepositoryResult<Record> {
    let collection = T::COLLECTION;
    match serde_json::to_value(stored) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(RepositoryError::Encode {
            collection,
            reason: format!("期望对象，得到 {}", other),
        }),
        Err(e) => Err(RepositoryError::Encode {
            collection,
            reason: e.to_string(),
        }),
    }
}

fn not_found<T: Entity>(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        collection: T::COLLECTION,
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MemoryStore;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    impl Entity for Note {
        const COLLECTION: Collection = Collection::Products;
    }

    /// 按顺序返回预设 ID
    struct ScriptedIds(StdMutex<Vec<&'static str>>);

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> String {
            self.0.lock().unwrap().remove(0).to_string()
        }
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_string(),
        }
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn repo_with(store: Arc<MemoryStore>, ids: Vec<&'static str>) -> Repository<Note> {
        Repository::new(store, Arc::new(ScriptedIds(StdMutex::new(ids))))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repo_with(Arc::new(MemoryStore::new()), vec!["a1", "a2"]);

        let first = repo.create(note("um")).await.unwrap();
        let second = repo.create(note("dois")).await.unwrap();

        assert_eq!(first.id, "a1");
        assert_eq!(second.id, "a2");
        assert_eq!(repo.get("a1").await.unwrap(), record(json!({"id": "a1", "text": "um"})));
        assert_eq!(
            repo.list().await.unwrap(),
            vec![
                record(json!({"id": "a1", "text": "um"})),
                record(json!({"id": "a2", "text": "dois"})),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_skips_ids_already_stored() {
        let repo = repo_with(Arc::new(MemoryStore::new()), vec!["x", "x", "", "y"]);

        repo.create(note("um")).await.unwrap();
        let second = repo.create(note("dois")).await.unwrap();

        assert_eq!(second.id, "y");
    }

    #[tokio::test]
    async fn test_create_gives_up_when_generator_repeats() {
        let ids = vec!["same"; MAX_ID_ATTEMPTS + 1];
        let repo = repo_with(Arc::new(MemoryStore::new()), ids);

        repo.create(note("um")).await.unwrap();
        let err = repo.create(note("dois")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::IdExhausted(Collection::Products)));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_id_and_overwrites_fields() {
        let repo = repo_with(Arc::new(MemoryStore::new()), vec!["a1"]);
        repo.create(note("um")).await.unwrap();

        let updated = repo.replace("a1", note("novo")).await.unwrap();
        assert_eq!(updated.id, "a1");
        assert_eq!(updated.fields, note("novo"));
        assert_eq!(repo.get("a1").await.unwrap(), record(json!({"id": "a1", "text": "novo"})));
    }

    #[tokio::test]
    async fn test_replace_drops_old_fields_of_target_only() {
        let store = Arc::new(MemoryStore::new());
        store
            .save(
                Collection::Products,
                &[
                    record(json!({"id": "a1", "text": "um", "estoque": 4})),
                    record(json!({"id": "a2", "text": "dois", "estoque": 9})),
                ],
            )
            .await
            .unwrap();
        let repo = repo_with(Arc::clone(&store), vec![]);

        repo.replace("a1", note("novo")).await.unwrap();

        assert_eq!(
            store.load(Collection::Products).await.unwrap(),
            vec![
                record(json!({"id": "a1", "text": "novo"})),
                record(json!({"id": "a2", "text": "dois", "estoque": 9})),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_ids_do_not_touch_collection() {
        let store = Arc::new(MemoryStore::new());
        let repo = repo_with(Arc::clone(&store), vec!["a1"]);
        repo.create(note("um")).await.unwrap();
        let before = store.load(Collection::Products).await.unwrap();

        assert!(matches!(
            repo.get("zz").await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.replace("zz", note("x")).await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete("zz").await,
            Err(RepositoryError::NotFound { .. })
        ));

        assert_eq!(store.load(Collection::Products).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = repo_with(Arc::new(MemoryStore::new()), vec!["a1", "a2"]);
        repo.create(note("um")).await.unwrap();
        repo.create(note("dois")).await.unwrap();

        repo.delete("a1").await.unwrap();

        assert!(matches!(
            repo.get("a1").await,
            Err(RepositoryError::NotFound { .. })
        ));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_records_are_flat() {
        let store = Arc::new(MemoryStore::new());
        let repo = repo_with(Arc::clone(&store), vec!["a1"]);
        repo.create(note("um")).await.unwrap();

        let raw = store.load(Collection::Products).await.unwrap();
        assert_eq!(Value::Object(raw[0].clone()), json!({"id": "a1", "text": "um"}));
    }

    #[tokio::test]
    async fn test_foreign_records_survive_writes() {
        let store = Arc::new(MemoryStore::new());
        let odd = vec![
            record(json!({"id": "o1"})),
            record(json!({"id": 7, "text": 3, "extra": [1, 2]})),
            record(json!({"text": "sem id"})),
        ];
        store.save(Collection::Products, &odd).await.unwrap();
        let repo = repo_with(Arc::clone(&store), vec!["a1"]);

        assert_eq!(repo.get("o1").await.unwrap(), odd[0]);
        assert!(matches!(
            repo.get("7").await,
            Err(RepositoryError::NotFound { .. })
        ));

        repo.create(note("um")).await.unwrap();
        repo.delete("a1").await.unwrap();

        assert_eq!(store.load(Collection::Products).await.unwrap(), odd);
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let repo: Repository<Note> = Repository::new(
            store,
            Arc::new(crate::infrastructure::ids::TimestampIds::new()),
        );

        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(note(&i.to_string())).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.list().await.unwrap().len(), 20);
    }
}
