// ==========================================
// 儿童成长发育评估引擎 - 远端持久化层
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.2 持久化存储接口
// ==========================================
// 职责: 定义里程碑成就/关注状态的持久化接口
// 红线: 持久化接口是唯一事实出口: UI 与服务端进程共用同一接口，
//       目录与曲线表不得在两侧各自维护副本
// ==========================================

pub mod error;
pub mod sqlite_store;

pub use error::{RemoteError, RemoteResult};
pub use sqlite_store::SqliteMilestoneStore;

use crate::domain::milestone::{AchievementRecord, WatchEntry};
use crate::domain::types::ConfirmedBy;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AchievementUpsert - 成就写入请求体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementUpsert {
    pub achieved_date: NaiveDate,
    pub confirmed_by: ConfirmedBy,
    pub notes: Option<String>,
}

// ==========================================
// ChildMilestoneSnapshot - 单儿童状态快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildMilestoneSnapshot {
    pub achieved_milestones: Vec<AchievementRecord>,
    pub watched_milestones: Vec<WatchEntry>,
}

// ==========================================
// MilestoneRemote - 持久化存储接口
// ==========================================
// 实现方约束:
// - 每 (child, milestone) 至多一条成就记录，写入即覆盖
// - 成就与关注互斥: 写入成就时必须同时清除对应关注
#[async_trait]
pub trait MilestoneRemote: Send + Sync {
    /// 读取单儿童的完整成就/关注快照
    async fn get_child_milestones(&self, child_id: &str) -> RemoteResult<ChildMilestoneSnapshot>;

    /// 写入（或覆盖）一条成就记录
    async fn mark_milestone_achieved(
        &self,
        child_id: &str,
        milestone_id: &str,
        request: &AchievementUpsert,
    ) -> RemoteResult<()>;

    /// 删除一条成就记录
    async fn unmark_milestone_achieved(&self, child_id: &str, milestone_id: &str)
        -> RemoteResult<()>;

    /// 加入关注清单（对已达成里程碑为 no-op）
    async fn watch_milestone(
        &self,
        child_id: &str,
        milestone_id: &str,
        added_date: NaiveDate,
    ) -> RemoteResult<()>;

    /// 移出关注清单
    async fn unwatch_milestone(&self, child_id: &str, milestone_id: &str) -> RemoteResult<()>;
}
