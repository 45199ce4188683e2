// ==========================================
// 儿童成长发育评估引擎 - 同步发件箱
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 4.2 同步协议
// ==========================================
// 职责: 记录每次本地变更产生的远端同步意图（追加式）
// 约束:
// - 意图只追加，不删除；投递结果只更新状态字段
// - seq 为单 store 内单调递增序号: 同一里程碑被快速连续切换时，
//   远端可能乱序处理，seq 留给后续对账工具还原本地顺序
// ==========================================

use crate::domain::types::ConfirmedBy;
use crate::store::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

// ==========================================
// SyncOperation - 同步操作类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncOperation {
    MarkAchieved {
        achieved_date: NaiveDate,
        confirmed_by: ConfirmedBy,
        notes: Option<String>,
    },
    UnmarkAchieved,
    Watch {
        added_date: NaiveDate,
    },
    Unwatch,
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOperation::MarkAchieved { .. } => write!(f, "MARK_ACHIEVED"),
            SyncOperation::UnmarkAchieved => write!(f, "UNMARK_ACHIEVED"),
            SyncOperation::Watch { .. } => write!(f, "WATCH"),
            SyncOperation::Unwatch => write!(f, "UNWATCH"),
        }
    }
}

// ==========================================
// IntentStatus - 投递状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    Pending,   // 已入箱，投递中
    Delivered, // 远端确认
    Failed,    // 远端失败（本地状态保持不变）
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentStatus::Pending => write!(f, "PENDING"),
            IntentStatus::Delivered => write!(f, "DELIVERED"),
            IntentStatus::Failed => write!(f, "FAILED"),
        }
    }
}

// ==========================================
// SyncIntent - 同步意图
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncIntent {
    pub seq: u64,                        // store 内单调序号
    pub intent_id: Uuid,                 // 意图唯一标识
    pub child_id: String,                // 儿童标识
    pub milestone_id: String,            // 里程碑主键
    pub operation: SyncOperation,        // 操作
    pub created_at: DateTime<Utc>,       // 入箱时间
    pub status: IntentStatus,            // 投递状态
    pub failure_reason: Option<String>,  // 失败原因（对账用）
}

// ==========================================
// Outbox - 追加式同步发件箱
// ==========================================
#[derive(Debug, Default)]
pub struct Outbox {
    next_seq: AtomicU64,
    entries: Mutex<Vec<SyncIntent>>,
}

impl Outbox {
    /// 创建空发件箱
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条同步意图，分配 seq 与 intent_id
    pub fn append(
        &self,
        child_id: &str,
        milestone_id: &str,
        operation: SyncOperation,
        created_at: DateTime<Utc>,
    ) -> StoreResult<SyncIntent> {
        let intent = SyncIntent {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
            intent_id: Uuid::new_v4(),
            child_id: child_id.to_string(),
            milestone_id: milestone_id.to_string(),
            operation,
            created_at,
            status: IntentStatus::Pending,
            failure_reason: None,
        };

        let mut entries = self.lock()?;
        entries.push(intent.clone());
        Ok(intent)
    }

    /// 标记意图投递成功
    pub fn mark_delivered(&self, intent_id: Uuid) -> StoreResult<()> {
        let mut entries = self.lock()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.intent_id == intent_id) {
            entry.status = IntentStatus::Delivered;
        }
        Ok(())
    }

    /// 标记意图投递失败（记录原因，不重试）
    pub fn mark_failed(&self, intent_id: Uuid, reason: String) -> StoreResult<()> {
        let mut entries = self.lock()?;
        if let Some(entry) = entries.iter_mut().find(|e| e.intent_id == intent_id) {
            entry.status = IntentStatus::Failed;
            entry.failure_reason = Some(reason);
        }
        Ok(())
    }

    /// 全部意图快照（按 seq 顺序）
    pub fn entries(&self) -> StoreResult<Vec<SyncIntent>> {
        Ok(self.lock()?.clone())
    }

    /// 投递中的意图
    pub fn pending(&self) -> StoreResult<Vec<SyncIntent>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|e| e.status == IntentStatus::Pending)
            .cloned()
            .collect())
    }

    /// 投递失败的意图（对账工具输入）
    pub fn failed(&self) -> StoreResult<Vec<SyncIntent>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|e| e.status == IntentStatus::Failed)
            .cloned()
            .collect())
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Vec<SyncIntent>>> {
        self.entries
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }
}
