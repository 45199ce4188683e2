// ==========================================
// 儿童成长发育评估引擎 - 里程碑目录
// ==========================================
// 依据: Growth_Engine_Design_v0.2.md - 2.1 里程碑目录
// 数据来源: CDC "Learn the Signs. Act Early." / WHO MGRS / AAP Bright Futures
// ==========================================
// 红线: 目录不可变，进程内唯一实例；客户端与服务端共用同一份，不得各自维护副本
// 不变量: 每条定义 min_months ≤ typical_months ≤ max_months
// ==========================================

use crate::domain::milestone::{Citation, MilestoneDefinition};
use crate::domain::types::DevelopmentDomain;
use std::sync::OnceLock;

// ==========================================
// MilestoneCatalog - 里程碑目录
// ==========================================
pub struct MilestoneCatalog {
    definitions: Vec<MilestoneDefinition>,
    citations: Vec<Citation>,
}

impl MilestoneCatalog {
    /// 全部里程碑定义
    pub fn all(&self) -> &[MilestoneDefinition] {
        &self.definitions
    }

    /// 按主键查找
    pub fn by_id(&self, id: &str) -> Option<&MilestoneDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// 按领域过滤
    pub fn for_domain(&self, domain: DevelopmentDomain) -> Vec<&MilestoneDefinition> {
        self.definitions.iter().filter(|d| d.domain == domain).collect()
    }

    /// 按月龄取放宽窗口 [min-1, max+3] 内的定义
    pub fn for_age(&self, age_months: u32) -> Vec<&MilestoneDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.visible_at(age_months))
            .collect()
    }

    /// 全部引用来源
    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    /// 取一组定义实际引用到的来源（按首次出现顺序去重）
    pub fn sources_for(&self, definitions: &[&MilestoneDefinition]) -> Vec<Citation> {
        let mut sources: Vec<Citation> = Vec::new();
        for definition in definitions {
            if sources.iter().any(|c| c.key == definition.source) {
                continue;
            }
            if let Some(citation) = self.citations.iter().find(|c| c.key == definition.source) {
                sources.push(citation.clone());
            }
        }
        sources
    }
}

/// 进程级目录单例
pub fn catalog() -> &'static MilestoneCatalog {
    static CATALOG: OnceLock<MilestoneCatalog> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

// 定义构造简写
#[allow(clippy::too_many_arguments)]
fn def(
    id: &str,
    domain: DevelopmentDomain,
    title: &str,
    description: &str,
    min_months: u32,
    typical_months: u32,
    max_months: u32,
    source: &str,
) -> MilestoneDefinition {
    MilestoneDefinition {
        id: id.to_string(),
        domain,
        title: title.to_string(),
        description: description.to_string(),
        min_months,
        typical_months,
        max_months,
        source: source.to_string(),
    }
}

fn build_catalog() -> MilestoneCatalog {
    use DevelopmentDomain::{Cognitive, Language, Motor, Sensory, Social};

    let citations = vec![
        Citation {
            key: "cdc-lts".to_string(),
            title: "Learn the Signs. Act Early.".to_string(),
            publisher: "CDC".to_string(),
            url: "https://www.cdc.gov/ncbddd/actearly/milestones/index.html".to_string(),
        },
        Citation {
            key: "who-mgrs".to_string(),
            title: "WHO Motor Development Study".to_string(),
            publisher: "WHO Multicentre Growth Reference Study Group".to_string(),
            url: "https://www.who.int/tools/child-growth-standards".to_string(),
        },
        Citation {
            key: "aap-bf".to_string(),
            title: "Bright Futures Guidelines".to_string(),
            publisher: "American Academy of Pediatrics".to_string(),
            url: "https://brightfutures.aap.org".to_string(),
        },
    ];

    let definitions = vec![
        // ===== 大运动与精细动作 =====
        def("lifts-head", Motor, "Lifts head during tummy time",
            "Raises head briefly while lying on tummy", 0, 1, 3, "cdc-lts"),
        def("rolls-over", Motor, "Rolls over",
            "Rolls from tummy to back, later back to tummy", 3, 4, 7, "cdc-lts"),
        def("sits-without-support", Motor, "Sits without support",
            "Sits steadily without propping on hands", 4, 6, 9, "who-mgrs"),
        def("crawls", Motor, "Crawls on hands and knees",
            "Moves forward on hands and knees", 6, 9, 12, "who-mgrs"),
        def("pulls-to-stand", Motor, "Pulls to stand",
            "Pulls up to standing while holding furniture", 6, 9, 12, "who-mgrs"),
        def("bangs-objects", Motor, "Bangs objects together",
            "Holds an object in each hand and bangs them together", 8, 10, 12, "cdc-lts"),
        def("pincer-grasp", Motor, "Uses pincer grasp",
            "Picks up small items between thumb and index finger", 8, 10, 12, "cdc-lts"),
        def("first-steps", Motor, "Takes first independent steps",
            "Walks a few steps without holding on", 9, 12, 15, "who-mgrs"),
        def("walks-well", Motor, "Walks well",
            "Walks alone with steady gait", 11, 14, 18, "who-mgrs"),
        def("kicks-ball", Motor, "Kicks a ball",
            "Kicks a ball forward without support", 14, 18, 24, "cdc-lts"),
        def("climbs-stairs", Motor, "Climbs stairs with help",
            "Walks up stairs holding a hand or rail", 16, 22, 30, "cdc-lts"),

        // ===== 语言 =====
        def("coos", Language, "Coos and makes vowel sounds",
            "Makes soft vowel sounds back and forth", 1, 2, 4, "cdc-lts"),
        def("babbles", Language, "Babbles with consonants",
            "Strings sounds like ba-ba, da-da without meaning", 4, 6, 9, "cdc-lts"),
        def("says-mama-dada", Language, "Says mama or dada with meaning",
            "Uses mama/dada for the specific parent", 6, 9, 13, "cdc-lts"),
        def("follows-simple-directions", Language, "Follows simple directions",
            "Responds to short requests like \"come here\"", 10, 14, 18, "cdc-lts"),
        def("first-word", Language, "Says first word",
            "Uses at least one word other than mama/dada", 9, 12, 15, "cdc-lts"),
        def("points-to-want", Language, "Points to ask for something",
            "Points at an object to request it", 9, 12, 15, "cdc-lts"),
        def("two-word-phrases", Language, "Combines two words",
            "Says two-word phrases like \"more milk\"", 16, 21, 27, "cdc-lts"),
        def("fifty-words", Language, "Uses fifty or more words",
            "Vocabulary of at least fifty spoken words", 20, 24, 30, "aap-bf"),
        def("names-pictures", Language, "Names pictures in a book",
            "Points to and names familiar pictures", 18, 24, 30, "cdc-lts"),

        // ===== 认知 =====
        def("tracks-moving-object", Cognitive, "Tracks a moving object",
            "Follows a slowly moving object with the eyes", 0, 2, 4, "cdc-lts"),
        def("reaches-for-toy", Cognitive, "Reaches for a toy",
            "Reaches out purposefully for a wanted toy", 3, 4, 6, "cdc-lts"),
        def("object-permanence", Cognitive, "Looks for hidden objects",
            "Searches for a toy seen being hidden", 6, 8, 12, "cdc-lts"),
        def("puts-objects-in-container", Cognitive, "Puts objects in a container",
            "Places small objects into a cup or box", 9, 12, 15, "cdc-lts"),
        def("imitates-actions", Cognitive, "Imitates everyday actions",
            "Copies actions like stirring or wiping", 8, 12, 16, "aap-bf"),
        def("pretend-play", Cognitive, "Simple pretend play",
            "Feeds a doll or pretends with everyday objects", 15, 18, 24, "cdc-lts"),
        def("sorts-shapes", Cognitive, "Sorts shapes and colors",
            "Groups toys by shape or color", 18, 24, 30, "cdc-lts"),
        def("completes-puzzles", Cognitive, "Completes simple puzzles",
            "Fits pieces into a three-piece shape puzzle", 24, 30, 36, "aap-bf"),

        // ===== 社交情感 =====
        def("social-smile", Social, "Smiles responsively",
            "Smiles back when spoken or smiled to", 1, 2, 4, "cdc-lts"),
        def("laughs-aloud", Social, "Laughs aloud",
            "Laughs in response to play", 2, 4, 6, "cdc-lts"),
        def("stranger-anxiety", Social, "Shows wariness of strangers",
            "Acts shy or clingy around unfamiliar people", 6, 8, 12, "cdc-lts"),
        def("plays-peekaboo", Social, "Plays peekaboo",
            "Engages in back-and-forth peekaboo play", 6, 9, 12, "cdc-lts"),
        def("waves-bye", Social, "Waves bye-bye",
            "Waves in greeting or farewell", 7, 9, 12, "cdc-lts"),
        def("shows-affection", Social, "Shows affection to familiar people",
            "Hugs or leans into familiar caregivers", 9, 12, 18, "cdc-lts"),
        def("parallel-play", Social, "Plays alongside other children",
            "Plays next to, and begins to involve, other children", 18, 24, 30, "aap-bf"),
        def("takes-turns", Social, "Takes turns in games",
            "Waits for a turn in simple games", 24, 30, 36, "aap-bf"),

        // ===== 感官 =====
        def("startles-to-sound", Sensory, "Startles at loud sounds",
            "Reacts with a startle to sudden loud noise", 0, 1, 2, "aap-bf"),
        def("turns-to-sound", Sensory, "Turns toward sounds",
            "Turns head toward a voice or rattle", 2, 4, 6, "cdc-lts"),
        def("responds-to-name", Sensory, "Responds to own name",
            "Looks up or turns when name is called", 5, 7, 9, "cdc-lts"),
        def("explores-textures", Sensory, "Explores objects with hands and mouth",
            "Examines textures by touching and mouthing", 4, 6, 9, "aap-bf"),
        def("notices-small-details", Sensory, "Notices small visual details",
            "Spots and inspects small crumbs or specks", 9, 12, 18, "aap-bf"),
        def("tolerates-grooming", Sensory, "Tolerates daily grooming",
            "Accepts hair brushing and face washing", 12, 18, 24, "aap-bf"),
    ];

    MilestoneCatalog { definitions, citations }
}
