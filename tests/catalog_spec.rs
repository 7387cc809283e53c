use std::fs;

use speculate2::speculate;
use taro::catalog::{Catalog, CatalogError, CatalogSource, LOAD_FAILED_NOTICE};
use taro::models::*;

const TWO_CARDS: &str = r#"[
    {"name": "Шут", "image": "fool.jpg", "meaning": "Начало, свобода"},
    {"name": "Туз Кубков", "image": "cups.jpg", "meaning": "Чувства, любовь", "full_meaning": "Сердце открыто."}
]"#;

speculate! {
    describe "the embedded catalog" {
        before {
            let catalog = Catalog::embedded().expect("embedded catalog");
        }

        it "holds every major arcana card" {
            for name in MAJOR_ARCANA {
                assert!(catalog.get(name).is_some(), "missing {}", name);
            }
        }

        it "has enough cards for a deck" {
            assert!(catalog.len() >= taro::catalog::DECK_SIZE);
        }

        it "is what the default source loads" {
            let (loaded, notice) = tokio_test::block_on(Catalog::load(&CatalogSource::default()));
            assert!(notice.is_none());
            assert_eq!(loaded.cards(), catalog.cards());
        }
    }

    describe "loading from a file" {
        before {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("cards.json");
        }

        it "keeps the file order and optional long text" {
            fs::write(&path, TWO_CARDS).expect("Failed to write");
            let (catalog, notice) = tokio_test::block_on(Catalog::load(&CatalogSource::File(path.clone())));

            assert!(notice.is_none());
            let names: Vec<&str> = catalog.cards().iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["Шут", "Туз Кубков"]);
            assert_eq!(catalog.get("Шут").expect("Missing card").interpretation(), "Начало, свобода");
            assert_eq!(catalog.get("Туз Кубков").expect("Missing card").interpretation(), "Сердце открыто.");
        }

        it "degrades to an empty catalog with a notice when the file is missing" {
            let (catalog, notice) = tokio_test::block_on(Catalog::load(&CatalogSource::File(path.clone())));

            assert!(catalog.is_empty());
            let notice = notice.expect("Missing notice");
            assert_eq!(notice.kind, NoticeKind::Error);
            assert_eq!(notice.text, LOAD_FAILED_NOTICE);
        }

        it "reports a parse error for malformed data" {
            fs::write(&path, "[{\"name\": 1}]").expect("Failed to write");
            let result = tokio_test::block_on(Catalog::fetch(&CatalogSource::File(path.clone())));
            assert!(matches!(result, Err(CatalogError::Parse(_))));
        }

        it "rejects duplicate names" {
            fs::write(
                &path,
                r#"[{"name": "Луна", "image": "", "meaning": "a"}, {"name": "Луна", "image": "", "meaning": "b"}]"#,
            )
            .expect("Failed to write");
            let result = tokio_test::block_on(Catalog::fetch(&CatalogSource::File(path.clone())));
            assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Луна"));
        }
    }

    describe "loading from a URL" {
        it "degrades to an empty catalog when the server is unreachable" {
            let source = CatalogSource::Url("http://127.0.0.1:1/cards.json".to_string());
            let (catalog, notice) = tokio_test::block_on(Catalog::load(&source));

            assert!(catalog.is_empty());
            assert!(notice.is_some());
        }
    }
}
