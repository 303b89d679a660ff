//! Fixed sample data the file store is populated with.
//!
//! The browser UI is demoed against this set; the folder tree references
//! entries by alias, so aliases must stay unique.

use uuid::Uuid;

/// Owner assigned to every seeded file.
pub const DEFAULT_OWNER_ID: i64 = 101;

pub struct FileSeed {
    pub uuid: &'static str,
    pub alias: &'static str,
    pub filename: &'static str,
    pub content_type: &'static str,
    pub content: &'static str,
}

pub const FILE_SEEDS: &[FileSeed] = &[
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000001",
        alias: "welcome-note",
        filename: "Добро пожаловать.txt",
        content_type: "text/plain",
        content: "Это ваш новый рабочий стол в VOblako. Загрузите сюда свои любимые проекты!",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000002",
        alias: "instructions",
        filename: "Инструкция.pdf",
        content_type: "application/pdf",
        content: "PDF-содержимое инструкции (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000003",
        alias: "roadmap",
        filename: "Roadmap.pdf",
        content_type: "application/pdf",
        content: "Дорожная карта проекта (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000004",
        alias: "moodboard",
        filename: "Moodboard.png",
        content_type: "image/png",
        content: "PNG bytes placeholder",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000005",
        alias: "ui-kit",
        filename: "UI-kit.fig",
        content_type: "application/octet-stream",
        content: "FIG файл (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000006",
        alias: "marketing-deck",
        filename: "Презентация.pptx",
        content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        content: "PPTX файл (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000007",
        alias: "contracts-a",
        filename: "Договор_А.pdf",
        content_type: "application/pdf",
        content: "Договор А (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000008",
        alias: "contracts-b",
        filename: "Договор_Б.pdf",
        content_type: "application/pdf",
        content: "Договор Б (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000009",
        alias: "report-q1",
        filename: "Отчет Q1.pdf",
        content_type: "application/pdf",
        content: "Отчет Q1 (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000010",
        alias: "estimate",
        filename: "Смета.xlsx",
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        content: "XLSX файл (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000011",
        alias: "archive-notes",
        filename: "Заметки.txt",
        content_type: "text/plain",
        content: "Архивные заметки",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000012",
        alias: "archive-photo",
        filename: "Фото.png",
        content_type: "image/png",
        content: "Фото (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000013",
        alias: "promo-mov",
        filename: "Promo.mov",
        content_type: "video/quicktime",
        content: "Видео PROMO (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000014",
        alias: "demo-mp4",
        filename: "Demo.mp4",
        content_type: "video/mp4",
        content: "Видео DEMO (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000015",
        alias: "team-photo",
        filename: "Team.jpg",
        content_type: "image/jpeg",
        content: "Фото команды",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000016",
        alias: "event-photo",
        filename: "Event.jpg",
        content_type: "image/jpeg",
        content: "Фото мероприятия",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000017",
        alias: "cover-psd",
        filename: "Обложка.psd",
        content_type: "image/vnd.adobe.photoshop",
        content: "PSD макет обложки",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000018",
        alias: "ticket",
        filename: "Ticket.pdf",
        content_type: "application/pdf",
        content: "Билет на самолёт",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000019",
        alias: "hotel-doc",
        filename: "Hotel.docx",
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        content: "Подтверждение брони",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000020",
        alias: "passport",
        filename: "Паспорт.png",
        content_type: "image/png",
        content: "Скан паспорта",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000021",
        alias: "release-plan",
        filename: "Release Plan.txt",
        content_type: "text/plain",
        content: "VOblako Release Plan:\n\n- Спортировать предпросмотр файлов (PDF/Text)\n- Подключить синхронизацию с внешним API\n- Подготовить демо-аккаунты для презентации",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000022",
        alias: "architecture-spec",
        filename: "Architecture Overview.pdf",
        content_type: "application/pdf",
        content: "Документ с описанием архитектуры сервиса (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000023",
        alias: "mock-pdf",
        filename: "Скан договора.pdf",
        content_type: "application/pdf",
        content: "Скан договора (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000024",
        alias: "mock-photo",
        filename: "Концепт обложки.jpg",
        content_type: "image/jpeg",
        content: "Концепт обложки (заглушка)",
    },
    FileSeed {
        uuid: "11111111-aaaa-4a1a-9b11-000000000025",
        alias: "mock-text",
        filename: "PDF Tips.txt",
        content_type: "text/plain",
        content: "Советы по работе с PDF в VOblako",
    },
];

/// Look up a seeded file id by its alias.
pub fn id_for_alias(alias: &str) -> Option<Uuid> {
    FILE_SEEDS
        .iter()
        .find(|seed| seed.alias == alias)
        .and_then(|seed| Uuid::parse_str(seed.uuid).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn aliases_and_ids_are_unique() {
        let aliases: HashSet<_> = FILE_SEEDS.iter().map(|s| s.alias).collect();
        let ids: HashSet<_> = FILE_SEEDS.iter().map(|s| s.uuid).collect();
        assert_eq!(aliases.len(), FILE_SEEDS.len());
        assert_eq!(ids.len(), FILE_SEEDS.len());
    }

    #[test]
    fn all_seed_ids_parse() {
        for seed in FILE_SEEDS {
            assert!(Uuid::parse_str(seed.uuid).is_ok(), "bad uuid for {}", seed.alias);
        }
    }

    #[test]
    fn alias_lookup_resolves() {
        assert!(id_for_alias("moodboard").is_some());
        assert!(id_for_alias("no-such-alias").is_none());
    }
}
