// ==========================================
// 儿童成长发育评估引擎 - SQLite 持久化存储
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.2 持久化存储接口
// 红线: 所有查询使用参数化,防止 SQL 注入
// ==========================================
// 职责: MilestoneRemote 的权威实现，供服务端进程（或单机部署）使用
// 约束: 成就与关注互斥在存储层同样成立
// ==========================================

use crate::db;
use crate::domain::milestone::{AchievementRecord, WatchEntry};
use crate::domain::types::ConfirmedBy;
use crate::remote::{
    AchievementUpsert, ChildMilestoneSnapshot, MilestoneRemote, RemoteError, RemoteResult,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// SqliteMilestoneStore - SQLite 持久化存储
// ==========================================
pub struct SqliteMilestoneStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteMilestoneStore {
    /// 打开（或创建）数据库文件并初始化 schema
    pub fn new(db_path: &str) -> RemoteResult<Self> {
        let conn = db::open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 内存数据库实例（测试与演示用）
    pub fn in_memory() -> RemoteResult<Self> {
        let conn = db::open_in_memory_connection()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（会再次应用统一 PRAGMA，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RemoteResult<Self> {
        {
            let guard = lock_conn(&conn)?;
            db::configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RemoteResult<MutexGuard<'_, Connection>> {
        lock_conn(&self.conn)
    }
}

fn lock_conn(conn: &Arc<Mutex<Connection>>) -> RemoteResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RemoteError::Unavailable(format!("锁获取失败: {}", e)))
}

/// 初始化数据库 schema
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS milestone_achievement (
            child_id      TEXT NOT NULL,
            milestone_id  TEXT NOT NULL,
            achieved_date TEXT NOT NULL,
            confirmed_by  TEXT NOT NULL,
            notes         TEXT,
            updated_at    TEXT NOT NULL,
            PRIMARY KEY (child_id, milestone_id)
        );

        CREATE TABLE IF NOT EXISTS milestone_watch (
            child_id      TEXT NOT NULL,
            milestone_id  TEXT NOT NULL,
            added_date    TEXT NOT NULL,
            PRIMARY KEY (child_id, milestone_id)
        );
        "#,
    )
}

#[async_trait]
impl MilestoneRemote for SqliteMilestoneStore {
    async fn get_child_milestones(&self, child_id: &str) -> RemoteResult<ChildMilestoneSnapshot> {
        let conn = self.lock()?;

        let mut achieved_stmt = conn.prepare(
            "SELECT milestone_id, achieved_date, confirmed_by, notes
             FROM milestone_achievement WHERE child_id = ?1
             ORDER BY milestone_id",
        )?;
        let achieved_rows = achieved_stmt.query_map(params![child_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, NaiveDate>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut achieved_milestones = Vec::new();
        for row in achieved_rows {
            let (milestone_id, achieved_date, confirmed_by_raw, notes) = row?;
            let confirmed_by = ConfirmedBy::from_wire(&confirmed_by_raw).ok_or_else(|| {
                RemoteError::FieldValueError {
                    field: "confirmed_by".to_string(),
                    message: format!("无法识别的取值: {}", confirmed_by_raw),
                }
            })?;
            achieved_milestones.push(AchievementRecord {
                milestone_id,
                achieved_date,
                confirmed_by,
                notes,
            });
        }

        let mut watch_stmt = conn.prepare(
            "SELECT milestone_id, added_date
             FROM milestone_watch WHERE child_id = ?1
             ORDER BY milestone_id",
        )?;
        let watch_rows = watch_stmt.query_map(params![child_id], |row| {
            Ok(WatchEntry {
                milestone_id: row.get(0)?,
                added_date: row.get(1)?,
            })
        })?;

        let mut watched_milestones = Vec::new();
        for row in watch_rows {
            watched_milestones.push(row?);
        }

        Ok(ChildMilestoneSnapshot {
            achieved_milestones,
            watched_milestones,
        })
    }

    async fn mark_milestone_achieved(
        &self,
        child_id: &str,
        milestone_id: &str,
        request: &AchievementUpsert,
    ) -> RemoteResult<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO milestone_achievement
                 (child_id, milestone_id, achieved_date, confirmed_by, notes, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (child_id, milestone_id) DO UPDATE SET
                 achieved_date = excluded.achieved_date,
                 confirmed_by  = excluded.confirmed_by,
                 notes         = excluded.notes,
                 updated_at    = excluded.updated_at",
            params![
                child_id,
                milestone_id,
                request.achieved_date,
                request.confirmed_by.to_string(),
                request.notes,
                Utc::now().to_rfc3339(),
            ],
        )?;

        // 互斥不变量: 达成即清除关注
        let removed = conn.execute(
            "DELETE FROM milestone_watch WHERE child_id = ?1 AND milestone_id = ?2",
            params![child_id, milestone_id],
        )?;
        if removed > 0 {
            debug!(child_id, milestone_id, "达成写入时清除了关注条目");
        }

        Ok(())
    }

    async fn unmark_milestone_achieved(
        &self,
        child_id: &str,
        milestone_id: &str,
    ) -> RemoteResult<()> {
        let conn = self.lock()?;
        // 取消确认不恢复关注条目
        conn.execute(
            "DELETE FROM milestone_achievement WHERE child_id = ?1 AND milestone_id = ?2",
            params![child_id, milestone_id],
        )?;
        Ok(())
    }

    async fn watch_milestone(
        &self,
        child_id: &str,
        milestone_id: &str,
        added_date: NaiveDate,
    ) -> RemoteResult<()> {
        let conn = self.lock()?;

        // 已达成的里程碑不进入关注清单
        let achieved: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM milestone_achievement WHERE child_id = ?1 AND milestone_id = ?2",
                params![child_id, milestone_id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        if achieved.is_some() {
            debug!(child_id, milestone_id, "里程碑已达成，关注请求忽略");
            return Ok(());
        }

        conn.execute(
            "INSERT INTO milestone_watch (child_id, milestone_id, added_date)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (child_id, milestone_id) DO NOTHING",
            params![child_id, milestone_id, added_date],
        )?;
        Ok(())
    }

    async fn unwatch_milestone(&self, child_id: &str, milestone_id: &str) -> RemoteResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM milestone_watch WHERE child_id = ?1 AND milestone_id = ?2",
            params![child_id, milestone_id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_from_connection_reuses_existing_handle() {
        let conn = Arc::new(Mutex::new(crate::db::open_in_memory_connection().unwrap()));
        let store = SqliteMilestoneStore::from_connection(Arc::clone(&conn)).unwrap();

        store
            .mark_milestone_achieved(
                "child-1",
                "crawls",
                &AchievementUpsert {
                    achieved_date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
                    confirmed_by: ConfirmedBy::Analysis,
                    notes: Some("hands and knees".to_string()),
                },
            )
            .await
            .unwrap();

        let snapshot = store.get_child_milestones("child-1").await.unwrap();
        assert_eq!(snapshot.achieved_milestones.len(), 1);
        let record = &snapshot.achieved_milestones[0];
        assert_eq!(record.milestone_id, "crawls");
        assert_eq!(record.confirmed_by, ConfirmedBy::Analysis);
        assert_eq!(record.notes.as_deref(), Some("hands and knees"));

        // 覆盖写入: 同一 (child, milestone) 至多一条
        store
            .mark_milestone_achieved(
                "child-1",
                "crawls",
                &AchievementUpsert {
                    achieved_date: NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
                    confirmed_by: ConfirmedBy::Parent,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let snapshot = store.get_child_milestones("child-1").await.unwrap();
        assert_eq!(snapshot.achieved_milestones.len(), 1);
        assert_eq!(
            snapshot.achieved_milestones[0].achieved_date,
            NaiveDate::from_ymd_opt(2026, 6, 20).unwrap()
        );
    }
}
