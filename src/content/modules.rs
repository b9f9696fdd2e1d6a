use crate::content::{Language, ModuleId};

/// Menu card for one exhibition screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: ModuleId,
    pub number: u8,
    title: [&'static str; 2],
    subtitle: [&'static str; 2],
    description: [&'static str; 2],
    /// Single glyph shown on the card.
    pub icon: &'static str,
    /// Accent colour as RGB.
    pub color: (u8, u8, u8),
}

impl ModuleInfo {
    pub fn title(&self, language: Language) -> &'static str {
        pick(self.title, language)
    }

    pub fn subtitle(&self, language: Language) -> &'static str {
        pick(self.subtitle, language)
    }

    pub fn description(&self, language: Language) -> &'static str {
        pick(self.description, language)
    }
}

fn pick(pair: [&'static str; 2], language: Language) -> &'static str {
    match language {
        Language::En => pair[0],
        Language::Th => pair[1],
    }
}

/// Menu cards in menu order.
pub static MODULES: [ModuleInfo; 5] = [
    ModuleInfo {
        id: ModuleId::Melody,
        number: 1,
        title: ["Melody", "ทำนอง"],
        subtitle: ["Melody", "ทำนอง"],
        description: [
            "Pitch moves up and down over time.",
            "ระดับเสียงเคลื่อนที่ขึ้นและลงตามเวลา",
        ],
        icon: "♪",
        color: (0x13, 0xc8, 0xec),
    },
    ModuleInfo {
        id: ModuleId::Rhythm,
        number: 2,
        title: ["Rhythm", "จังหวะ"],
        subtitle: ["Rhythm", "จังหวะ"],
        description: [
            "Tap the grid to create visualization.",
            "แตะที่ตารางเพื่อสร้างภาพจำลองจังหวะ",
        ],
        icon: "▦",
        color: (0x10, 0xb9, 0x81),
    },
    ModuleInfo {
        id: ModuleId::Tempo,
        number: 3,
        title: ["Tempo", "ความเร็ว"],
        subtitle: ["Tempo", "ความเร็ว"],
        description: [
            "Tempo is the speed of the beat.",
            "ความเร็วคือความเร็วของจังหวะ",
        ],
        icon: "◷",
        color: (0xf5, 0x9e, 0x0b),
    },
    ModuleInfo {
        id: ModuleId::Dynamics,
        number: 4,
        title: ["Dynamics", "ความดัง-เบา"],
        subtitle: ["Dynamics", "ความดัง-เบา"],
        description: [
            "Explore volume variation.",
            "สำรวจความแตกต่างระหว่างเสียงดังและเบา",
        ],
        icon: "◢",
        color: (0xa8, 0x55, 0xf7),
    },
    ModuleInfo {
        id: ModuleId::Harmony,
        number: 5,
        title: ["Harmony", "เสียงประสาน"],
        subtitle: ["Harmony", "เสียงประสาน"],
        description: [
            "Layer notes to build texture.",
            "วางตัวโน้ตซ้อนกันเพื่อสร้างเสียงประสาน",
        ],
        icon: "♫",
        color: (0x13, 0xc8, 0xec),
    },
];

/// Card for `id`. The menu itself has none.
pub fn info(id: ModuleId) -> Option<&'static ModuleInfo> {
    MODULES.iter().find(|module| module.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_has_a_card() {
        for id in ModuleId::ORDER {
            assert!(info(id).is_some(), "{id:?}");
        }
        assert!(info(ModuleId::Menu).is_none());
    }

    #[test]
    fn cards_are_bilingual() {
        let tempo = info(ModuleId::Tempo).map(|m| (m.title(Language::En), m.title(Language::Th)));
        assert_eq!(tempo, Some(("Tempo", "ความเร็ว")));
        for module in &MODULES {
            assert_ne!(module.description(Language::En), module.description(Language::Th));
        }
    }
}
