// ==========================================
// AchievementStore 状态机集成测试
// ==========================================
// 测试目标: 验证本地优先状态机与尽力而为同步
// 覆盖范围: 互斥不变量 / 失败不回滚 / 发件箱序号 / 快照水合
// ==========================================


use growth_compass::domain::milestone::{AchievementRecord, WatchEntry};
use growth_compass::domain::types::ConfirmedBy;
use growth_compass::remote::ChildMilestoneSnapshot;
use growth_compass::store::{AchievementStore, IntentStatus, SyncOperation};
use test_helpers::{date, wait_until, RecordingRemote};
use std::sync::Arc;

// ==========================================
// 测试用例 1: 关注后达成 → 无残留关注条目
// ==========================================

#[tokio::test]
async fn test_watch_then_mark_leaves_no_watch_entry() {
    let remote = Arc::new(RecordingRemote::new());
    let mut store = AchievementStore::new("child-1", remote.clone());

    store.watch("first-steps", date(2026, 7, 1)).unwrap();
    assert!(store.is_watched("first-steps"));

    store
        .mark_achieved("first-steps", date(2026, 7, 20), None, ConfirmedBy::Parent)
        .unwrap();

    // 互斥不变量: 达成即移除关注
    assert!(store.is_achieved("first-steps"));
    assert!(!store.is_watched("first-steps"));
    assert!(store.watch_list().is_empty());

    wait_until("两条意图均投递成功", || {
        store.outbox().pending().unwrap().is_empty()
    })
    .await;
    let calls = remote.recorded_calls();
    assert!(calls.iter().any(|c| c.starts_with("watch:child-1:first-steps")));
    assert!(calls.iter().any(|c| c.starts_with("mark:child-1:first-steps")));
}

// ==========================================
// 测试用例 2: 取消达成不恢复关注条目
// ==========================================

#[tokio::test]
async fn test_unmark_does_not_recreate_watch() {
    let remote = Arc::new(RecordingRemote::new());
    let mut store = AchievementStore::new("child-1", remote.clone());

    store.watch("crawls", date(2026, 6, 1)).unwrap();
    store
        .mark_achieved("crawls", date(2026, 6, 15), None, ConfirmedBy::Analysis)
        .unwrap();
    assert_eq!(
        store.achievement("crawls").map(|r| r.confirmed_by),
        Some(ConfirmedBy::Analysis)
    );

    let changed = store.unmark_achieved("crawls").unwrap();

    assert!(changed);
    assert!(!store.is_achieved("crawls"));
    assert!(store.achievement("crawls").is_none());
    assert!(!store.is_watched("crawls"));

    // 对不存在的记录再次取消为 no-op，且不产生新意图
    let before = store.outbox().entries().unwrap().len();
    assert!(!store.unmark_achieved("crawls").unwrap());
    assert_eq!(store.outbox().entries().unwrap().len(), before);
}

// ==========================================
// 测试用例 3: 远端失败不回滚本地状态
// ==========================================

#[tokio::test]
async fn test_remote_failure_keeps_local_state() {
    growth_compass::logging::init_test();

    let remote = Arc::new(RecordingRemote::failing());
    let mut store = AchievementStore::new("child-1", remote.clone());

    let record = store
        .mark_achieved(
            "pincer-grasp",
            date(2026, 8, 1),
            Some("picked up a blueberry".to_string()),
            ConfirmedBy::Parent,
        )
        .unwrap();
    assert_eq!(record.milestone_id, "pincer-grasp");

    // 本地状态立即生效
    assert!(store.is_achieved("pincer-grasp"));

    // 投递失败只落在发件箱，本地状态保持不变
    wait_until("失败意图落定", || !store.outbox().failed().unwrap().is_empty()).await;
    assert!(store.is_achieved("pincer-grasp"));

    let failed = store.outbox().failed().unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].status, IntentStatus::Failed);
    assert!(failed[0].failure_reason.as_deref().unwrap().contains("模拟网络故障"));
}

// ==========================================
// 测试用例 4: 快速连续切换: 本地以最后一次为准，发件箱保序
// ==========================================

#[tokio::test]
async fn test_rapid_toggle_last_local_mutation_wins() {
    let remote = Arc::new(RecordingRemote::new());
    let mut store = AchievementStore::new("child-1", remote.clone());

    store
        .mark_achieved("waves-bye", date(2026, 8, 1), None, ConfirmedBy::Parent)
        .unwrap();
    store.unmark_achieved("waves-bye").unwrap();

    // 本地以最后一次变更为准
    assert!(!store.is_achieved("waves-bye"));

    // 发件箱按 seq 还原本地顺序（远端可能乱序处理，对账工具可据此还原）
    let entries = store.outbox().entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].seq < entries[1].seq);
    assert!(matches!(entries[0].operation, SyncOperation::MarkAchieved { .. }));
    assert!(matches!(entries[1].operation, SyncOperation::UnmarkAchieved));
}

// ==========================================
// 测试用例 5: 已达成里程碑的关注请求被忽略
// ==========================================

#[tokio::test]
async fn test_watch_on_achieved_milestone_is_ignored() {
    let remote = Arc::new(RecordingRemote::new());
    let mut store = AchievementStore::new("child-1", remote.clone());

    store
        .mark_achieved("babbles", date(2026, 5, 1), None, ConfirmedBy::Parent)
        .unwrap();

    let before = store.outbox().entries().unwrap().len();
    let changed = store.watch("babbles", date(2026, 5, 2)).unwrap();

    assert!(!changed);
    assert!(!store.is_watched("babbles"));
    // 被忽略的请求不产生同步意图
    assert_eq!(store.outbox().entries().unwrap().len(), before);
}

// ==========================================
// 测试用例 6: 快照水合整体替换本地状态
// ==========================================

#[tokio::test]
async fn test_apply_snapshot_replaces_state() {
    let remote = Arc::new(RecordingRemote::new());
    let mut store = AchievementStore::new("child-1", remote.clone());

    store.watch("coos", date(2026, 3, 1)).unwrap();

    store.apply_snapshot(ChildMilestoneSnapshot {
        achieved_milestones: vec![AchievementRecord {
            milestone_id: "social-smile".to_string(),
            achieved_date: date(2026, 2, 10),
            confirmed_by: ConfirmedBy::Parent,
            notes: None,
        }],
        watched_milestones: vec![
            WatchEntry {
                milestone_id: "rolls-over".to_string(),
                added_date: date(2026, 3, 5),
            },
            // 与成就记录冲突的关注条目在水合时被丢弃
            WatchEntry {
                milestone_id: "social-smile".to_string(),
                added_date: date(2026, 2, 1),
            },
        ],
    });

    assert!(store.is_achieved("social-smile"));
    assert!(store.is_watched("rolls-over"));
    assert!(!store.is_watched("social-smile"));
    // 水合前的本地关注被整体替换
    assert!(!store.is_watched("coos"));
}
