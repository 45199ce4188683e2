// ==========================================
// 儿童成长发育评估引擎 - 里程碑 API
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 6.3 对外接口
// ==========================================
// 职责: 里程碑查询 + 成就状态变更入口 + 会话水合
// 约束:
// - 里程碑主键必须存在于目录（输入校验，任何变更之前）
// - 变更的远端同步失败不向调用方暴露；水合是读取，失败要暴露
// ==========================================

use crate::api::error::{validate_age_months, validate_child_id, ApiError, ApiResult};
use crate::domain::milestone::{AchievementRecord, Citation, MilestoneDefinition, WatchEntry};
use crate::domain::types::ConfirmedBy;
use crate::engine::window::{MilestoneOutlook, MilestoneWindowResolver};
use crate::reference::catalog::catalog;
use crate::remote::MilestoneRemote;
use crate::store::achievement::AchievementStore;
use crate::store::outbox::SyncIntent;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::instrument;

// ==========================================
// MilestoneWindowView - 月龄窗口查询结果
// ==========================================
#[derive(Debug, Clone)]
pub struct MilestoneWindowView {
    pub milestones: Vec<MilestoneDefinition>,  // 放宽窗口内的定义
    pub sources: Vec<Citation>,                // 实际引用到的来源
}

// ==========================================
// MilestoneApi - 里程碑 API
// ==========================================
// 会话管理: 每儿童一个 AchievementStore，首次访问时懒创建
pub struct MilestoneApi {
    remote: Arc<dyn MilestoneRemote>,
    resolver: MilestoneWindowResolver,
    sessions: Mutex<HashMap<String, AchievementStore>>,
}

impl MilestoneApi {
    /// 创建新的里程碑 API
    ///
    /// # 参数
    /// - remote: 持久化存储实现（远端服务或本地 SQLite）
    pub fn new(remote: Arc<dyn MilestoneRemote>) -> Self {
        Self {
            remote,
            resolver: MilestoneWindowResolver::new(),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 取月龄放宽窗口内的里程碑与引用来源
    #[instrument(skip(self))]
    pub fn get_milestones_for_age(&self, age_months: u32) -> ApiResult<MilestoneWindowView> {
        validate_age_months(age_months)?;

        let definitions = self.resolver.milestones_for_age(catalog(), age_months);
        let sources = catalog().sources_for(&definitions);

        Ok(MilestoneWindowView {
            milestones: definitions.into_iter().cloned().collect(),
            sources,
        })
    }

    /// 单儿童月龄视窗分组（已达成项从待办中抑制）
    pub fn outlook(&self, child_id: &str, age_months: u32) -> ApiResult<MilestoneOutlook> {
        validate_child_id(child_id)?;
        validate_age_months(age_months)?;

        let achieved_ids = self.with_session(child_id, |store| store.achieved_ids())?;
        Ok(self.resolver.outlook(catalog(), age_months, &achieved_ids))
    }

    /// 单儿童全部成就记录
    pub fn achievements(&self, child_id: &str) -> ApiResult<Vec<AchievementRecord>> {
        validate_child_id(child_id)?;
        self.with_session(child_id, |store| store.achievements())
    }

    /// 单儿童关注清单
    pub fn watch_list(&self, child_id: &str) -> ApiResult<Vec<WatchEntry>> {
        validate_child_id(child_id)?;
        self.with_session(child_id, |store| store.watch_list())
    }

    /// 单儿童同步发件箱快照（对账工具入口）
    pub fn outbox_entries(&self, child_id: &str) -> ApiResult<Vec<SyncIntent>> {
        validate_child_id(child_id)?;
        Ok(self.with_session(child_id, |store| store.outbox().entries())??)
    }

    // ==========================================
    // 会话水合
    // ==========================================

    /// 从远端拉取快照并整体替换本地状态
    ///
    /// 这是读取路径: 远端失败在此向调用方暴露
    #[instrument(skip(self))]
    pub async fn sync_achievement_state(&self, child_id: &str) -> ApiResult<()> {
        validate_child_id(child_id)?;

        // 先完成远端读取，再短暂持锁应用（锁不跨 await）
        let snapshot = self.remote.get_child_milestones(child_id).await?;
        self.with_session(child_id, |store| store.apply_snapshot(snapshot))
    }

    // ==========================================
    // 状态变更（本地优先，远端尽力而为）
    // ==========================================

    /// 标记里程碑达成
    #[instrument(skip(self, notes))]
    pub fn mark_achieved(
        &self,
        child_id: &str,
        milestone_id: &str,
        achieved_date: NaiveDate,
        notes: Option<String>,
        confirmed_by: ConfirmedBy,
    ) -> ApiResult<AchievementRecord> {
        self.validate_mutation_input(child_id, milestone_id)?;
        Ok(self.with_session(child_id, |store| {
            store.mark_achieved(milestone_id, achieved_date, notes, confirmed_by)
        })??)
    }

    /// 取消达成标记（不恢复关注条目）
    #[instrument(skip(self))]
    pub fn unmark_achieved(&self, child_id: &str, milestone_id: &str) -> ApiResult<bool> {
        self.validate_mutation_input(child_id, milestone_id)?;
        Ok(self.with_session(child_id, |store| store.unmark_achieved(milestone_id))??)
    }

    /// 加入关注清单（已达成的里程碑忽略请求）
    #[instrument(skip(self))]
    pub fn watch(
        &self,
        child_id: &str,
        milestone_id: &str,
        added_date: NaiveDate,
    ) -> ApiResult<bool> {
        self.validate_mutation_input(child_id, milestone_id)?;
        Ok(self.with_session(child_id, |store| store.watch(milestone_id, added_date))??)
    }

    /// 移出关注清单
    #[instrument(skip(self))]
    pub fn unwatch(&self, child_id: &str, milestone_id: &str) -> ApiResult<bool> {
        self.validate_mutation_input(child_id, milestone_id)?;
        Ok(self.with_session(child_id, |store| store.unwatch(milestone_id))??)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 变更入口统一校验: 儿童标识非空 + 里程碑存在于目录
    fn validate_mutation_input(&self, child_id: &str, milestone_id: &str) -> ApiResult<()> {
        validate_child_id(child_id)?;
        if catalog().by_id(milestone_id).is_none() {
            return Err(ApiError::NotFound(format!("里程碑不存在: {}", milestone_id)));
        }
        Ok(())
    }

    /// 在会话存储上执行操作（懒创建）
    fn with_session<R>(
        &self,
        child_id: &str,
        f: impl FnOnce(&mut AchievementStore) -> R,
    ) -> ApiResult<R> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))?;
        let store = sessions
            .entry(child_id.to_string())
            .or_insert_with(|| AchievementStore::new(child_id, Arc::clone(&self.remote)));
        Ok(f(store))
    }
}
