// ==========================================
// 儿童成长发育评估引擎 - 里程碑窗口解析引擎
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 2.2 Window Resolver
// ==========================================
// 职责: 按月龄划分里程碑阶段，抑制已达成项
// 输入: 目录 + 月龄 + 已达成集合
// 输出: MilestonePhase / MilestoneOutlook
// ==========================================

use crate::domain::milestone::MilestoneDefinition;
use crate::domain::types::MilestonePhase;
use crate::reference::catalog::MilestoneCatalog;
use std::collections::HashSet;
use tracing::instrument;

// ==========================================
// MilestoneOutlook - 月龄视窗分组结果
// ==========================================
// 仅覆盖放宽窗口 [min-1, max+3] 内可见的定义；
// 窗口完全过去超出可见范围的定义仍可经 classify 单独查询
#[derive(Debug, Clone, Default)]
pub struct MilestoneOutlook {
    pub current: Vec<MilestoneDefinition>,    // 窗口内未达成
    pub upcoming: Vec<MilestoneDefinition>,   // 窗口未开始
    pub overdue: Vec<MilestoneDefinition>,    // 窗口已过未达成
    pub achieved: Vec<MilestoneDefinition>,   // 已达成（从待办中抑制）
}

// ==========================================
// MilestoneWindowResolver - 窗口解析引擎
// ==========================================
// 纯函数计算，可并发调用，无需同步
#[derive(Debug, Default)]
pub struct MilestoneWindowResolver;

impl MilestoneWindowResolver {
    /// 创建新的窗口解析引擎
    pub fn new() -> Self {
        Self
    }

    /// 取月龄放宽窗口内可见的全部定义
    pub fn milestones_for_age<'a>(
        &self,
        catalog: &'a MilestoneCatalog,
        age_months: u32,
    ) -> Vec<&'a MilestoneDefinition> {
        catalog.for_age(age_months)
    }

    /// 单条定义的阶段判定
    ///
    /// 规则（顺序执行，命中即返回）:
    /// 1) 存在成就记录 → Achieved（与月龄无关）
    /// 2) min_months ≤ age ≤ max_months → Current
    /// 3) min_months > age → Upcoming
    /// 4) 其他（窗口已完全过去）→ Overdue
    pub fn classify(
        &self,
        definition: &MilestoneDefinition,
        age_months: u32,
        achieved_ids: &HashSet<String>,
    ) -> MilestonePhase {
        if achieved_ids.contains(&definition.id) {
            return MilestonePhase::Achieved;
        }
        if definition.window_contains(age_months) {
            return MilestonePhase::Current;
        }
        if definition.min_months > age_months {
            return MilestonePhase::Upcoming;
        }
        MilestonePhase::Overdue
    }

    /// 月龄视窗分组
    ///
    /// 将可见窗口内的定义按阶段分入四组；已达成项从 current/upcoming/overdue
    /// 中抑制，单独归入 achieved
    #[instrument(skip(self, catalog, achieved_ids), fields(achieved = achieved_ids.len()))]
    pub fn outlook(
        &self,
        catalog: &MilestoneCatalog,
        age_months: u32,
        achieved_ids: &HashSet<String>,
    ) -> MilestoneOutlook {
        let mut outlook = MilestoneOutlook::default();

        for definition in catalog.for_age(age_months) {
            match self.classify(definition, age_months, achieved_ids) {
                MilestonePhase::Achieved => outlook.achieved.push(definition.clone()),
                MilestonePhase::Current => outlook.current.push(definition.clone()),
                MilestonePhase::Upcoming => outlook.upcoming.push(definition.clone()),
                MilestonePhase::Overdue => outlook.overdue.push(definition.clone()),
            }
        }

        outlook
    }
}
