// ==========================================
// 儿童成长发育评估引擎 - 成就状态机
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 4.1 状态机
// ==========================================
// 状态: NotTracked → Watched → Achieved；Achieved/Watched → NotTracked
// 红线:
// - 变更先无条件落本地，远端同步尽力而为，失败不回滚
// - 成就与关注互斥: markAchieved 必须移除对应关注条目
// 约束: 单儿童会话单逻辑线程；本地状态无内部锁，
//       跨任务共享的只有发件箱与远端句柄
// 注意: 变更方法会 tokio::spawn 投递任务，须在 Tokio runtime 内调用
// ==========================================

use crate::domain::milestone::{AchievementRecord, WatchEntry};
use crate::domain::types::ConfirmedBy;
use crate::remote::{AchievementUpsert, ChildMilestoneSnapshot, MilestoneRemote};
use crate::store::error::StoreResult;
use crate::store::outbox::{Outbox, SyncIntent, SyncOperation};
use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

// ==========================================
// AchievementStore - 单儿童成就状态存储
// ==========================================
pub struct AchievementStore {
    child_id: String,
    achieved: HashMap<String, AchievementRecord>,
    watched: HashMap<String, WatchEntry>,
    outbox: Arc<Outbox>,
    remote: Arc<dyn MilestoneRemote>,
}

impl AchievementStore {
    /// 创建空的成就状态存储
    pub fn new(child_id: impl Into<String>, remote: Arc<dyn MilestoneRemote>) -> Self {
        Self {
            child_id: child_id.into(),
            achieved: HashMap::new(),
            watched: HashMap::new(),
            outbox: Arc::new(Outbox::new()),
            remote,
        }
    }

    /// 儿童标识
    pub fn child_id(&self) -> &str {
        &self.child_id
    }

    // ==========================================
    // 状态变更（本地优先 + 尽力而为同步）
    // ==========================================

    /// 标记里程碑达成
    ///
    /// 规则:
    /// 1) 创建/覆盖成就记录（每里程碑至多一条）
    /// 2) 移除对应关注条目（互斥不变量）
    /// 3) 入箱并投递 MARK_ACHIEVED 意图
    #[instrument(skip(self, notes), fields(child_id = %self.child_id))]
    pub fn mark_achieved(
        &mut self,
        milestone_id: &str,
        achieved_date: NaiveDate,
        notes: Option<String>,
        confirmed_by: ConfirmedBy,
    ) -> StoreResult<AchievementRecord> {
        let record = AchievementRecord {
            milestone_id: milestone_id.to_string(),
            achieved_date,
            confirmed_by,
            notes: notes.clone(),
        };
        self.achieved.insert(milestone_id.to_string(), record.clone());

        if self.watched.remove(milestone_id).is_some() {
            debug!(milestone_id, "达成时移除了关注条目");
        }

        self.dispatch(
            milestone_id,
            SyncOperation::MarkAchieved {
                achieved_date,
                confirmed_by,
                notes,
            },
        )?;

        Ok(record)
    }

    /// 取消达成标记
    ///
    /// 删除成就记录；不恢复关注条目。对不存在的记录为 no-op（返回 false）
    #[instrument(skip(self), fields(child_id = %self.child_id))]
    pub fn unmark_achieved(&mut self, milestone_id: &str) -> StoreResult<bool> {
        if self.achieved.remove(milestone_id).is_none() {
            return Ok(false);
        }

        self.dispatch(milestone_id, SyncOperation::UnmarkAchieved)?;
        Ok(true)
    }

    /// 加入关注清单
    ///
    /// 已达成的里程碑忽略请求（返回 false）；重复关注为 no-op
    #[instrument(skip(self), fields(child_id = %self.child_id))]
    pub fn watch(&mut self, milestone_id: &str, added_date: NaiveDate) -> StoreResult<bool> {
        if self.achieved.contains_key(milestone_id) {
            debug!(milestone_id, "里程碑已达成，关注请求忽略");
            return Ok(false);
        }
        if self.watched.contains_key(milestone_id) {
            return Ok(false);
        }

        self.watched.insert(
            milestone_id.to_string(),
            WatchEntry {
                milestone_id: milestone_id.to_string(),
                added_date,
            },
        );

        self.dispatch(milestone_id, SyncOperation::Watch { added_date })?;
        Ok(true)
    }

    /// 移出关注清单
    ///
    /// 对未关注的里程碑为 no-op（返回 false）
    #[instrument(skip(self), fields(child_id = %self.child_id))]
    pub fn unwatch(&mut self, milestone_id: &str) -> StoreResult<bool> {
        if self.watched.remove(milestone_id).is_none() {
            return Ok(false);
        }

        self.dispatch(milestone_id, SyncOperation::Unwatch)?;
        Ok(true)
    }

    /// 用远端快照整体替换本地状态（会话拉起时的水合）
    ///
    /// 快照内违反互斥不变量的关注条目在此丢弃
    pub fn apply_snapshot(&mut self, snapshot: ChildMilestoneSnapshot) {
        self.achieved = snapshot
            .achieved_milestones
            .into_iter()
            .map(|r| (r.milestone_id.clone(), r))
            .collect();
        self.watched = snapshot
            .watched_milestones
            .into_iter()
            .filter(|w| {
                let keep = !self.achieved.contains_key(&w.milestone_id);
                if !keep {
                    warn!(
                        milestone_id = %w.milestone_id,
                        "远端快照中的关注条目与成就记录冲突，已丢弃"
                    );
                }
                keep
            })
            .map(|w| (w.milestone_id.clone(), w))
            .collect();
    }

    // ==========================================
    // 只读访问
    // ==========================================

    /// 是否已达成
    pub fn is_achieved(&self, milestone_id: &str) -> bool {
        self.achieved.contains_key(milestone_id)
    }

    /// 是否在关注清单中
    pub fn is_watched(&self, milestone_id: &str) -> bool {
        self.watched.contains_key(milestone_id)
    }

    /// 单条成就记录
    pub fn achievement(&self, milestone_id: &str) -> Option<&AchievementRecord> {
        self.achieved.get(milestone_id)
    }

    /// 已达成里程碑主键集合（供窗口解析引擎抑制已达成项）
    pub fn achieved_ids(&self) -> HashSet<String> {
        self.achieved.keys().cloned().collect()
    }

    /// 全部成就记录（按里程碑主键排序）
    pub fn achievements(&self) -> Vec<AchievementRecord> {
        let mut records: Vec<AchievementRecord> = self.achieved.values().cloned().collect();
        records.sort_by(|a, b| a.milestone_id.cmp(&b.milestone_id));
        records
    }

    /// 全部关注条目（按里程碑主键排序）
    pub fn watch_list(&self) -> Vec<WatchEntry> {
        let mut entries: Vec<WatchEntry> = self.watched.values().cloned().collect();
        entries.sort_by(|a, b| a.milestone_id.cmp(&b.milestone_id));
        entries
    }

    /// 同步发件箱
    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    // ==========================================
    // 同步投递
    // ==========================================

    /// 入箱并启动一次独立的尽力而为投递
    ///
    /// 不同里程碑的投递可并发在途，互相之间无顺序保证
    fn dispatch(&self, milestone_id: &str, operation: SyncOperation) -> StoreResult<()> {
        let intent = self
            .outbox
            .append(&self.child_id, milestone_id, operation, Utc::now())?;

        let remote = Arc::clone(&self.remote);
        let outbox = Arc::clone(&self.outbox);
        tokio::spawn(async move {
            deliver(remote, outbox, intent).await;
        });

        Ok(())
    }
}

/// 单次投递: 远端调用一次，结果只写回发件箱
///
/// 失败（网络或接口错误）只记日志与发件箱，绝不触碰本地状态
async fn deliver(remote: Arc<dyn MilestoneRemote>, outbox: Arc<Outbox>, intent: SyncIntent) {
    let result = match &intent.operation {
        SyncOperation::MarkAchieved {
            achieved_date,
            confirmed_by,
            notes,
        } => {
            remote
                .mark_milestone_achieved(
                    &intent.child_id,
                    &intent.milestone_id,
                    &AchievementUpsert {
                        achieved_date: *achieved_date,
                        confirmed_by: *confirmed_by,
                        notes: notes.clone(),
                    },
                )
                .await
        }
        SyncOperation::UnmarkAchieved => {
            remote
                .unmark_milestone_achieved(&intent.child_id, &intent.milestone_id)
                .await
        }
        SyncOperation::Watch { added_date } => {
            remote
                .watch_milestone(&intent.child_id, &intent.milestone_id, *added_date)
                .await
        }
        SyncOperation::Unwatch => {
            remote
                .unwatch_milestone(&intent.child_id, &intent.milestone_id)
                .await
        }
    };

    match result {
        Ok(()) => {
            if let Err(e) = outbox.mark_delivered(intent.intent_id) {
                warn!(intent_id = %intent.intent_id, error = %e, "发件箱状态更新失败");
            }
        }
        Err(err) => {
            warn!(
                child_id = %intent.child_id,
                milestone_id = %intent.milestone_id,
                seq = intent.seq,
                operation = %intent.operation,
                error = %err,
                "远端同步失败，本地状态保持不变"
            );
            if let Err(e) = outbox.mark_failed(intent.intent_id, err.to_string()) {
                warn!(intent_id = %intent.intent_id, error = %e, "发件箱状态更新失败");
            }
        }
    }
}
