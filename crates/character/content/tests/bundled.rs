//! The bundled data directory loads, lints clean and drives the calculator.

use std::fs;

use character_content::{ContentFactory, lint};
use character_core::engine::DamageModifier;
use character_core::{
    AttributeScores, CharacterBuildData, CharacterCalculator, ChoiceKey, ContentKind,
    LanguageFluency, MasteryLevel,
};

fn human_barbarian() -> CharacterBuildData {
    CharacterBuildData::new("Ragna", "barbarian", 1, AttributeScores::new(3, 1, 0, 0))
        .with_ancestry("human")
        .with_trait("human_undying")
        .with_choice(ChoiceKey::new("human_attribute_increase", "attribute"), ["might"])
        .with_choice(ChoiceKey::new("human_skill_expertise", "skill"), ["athletics"])
        .with_skill("athletics", MasteryLevel::Adept)
        .with_skill("intimidation", MasteryLevel::Novice)
        .with_skill("awareness", MasteryLevel::Novice)
        .with_skill("survival", MasteryLevel::Novice)
        .with_trade("smithing", MasteryLevel::Novice)
        .with_trade("cooking", MasteryLevel::Novice)
        .with_trade("brewing", MasteryLevel::Novice)
        .with_language("Common", LanguageFluency::Fluent)
}

#[test]
fn bundled_content_loads_and_lints_clean() {
    let factory = ContentFactory::bundled();
    let tables = factory.load_tables().unwrap();
    let config = factory.load_config().unwrap();

    assert_eq!(tables.ancestries().count(), 2);
    assert_eq!(tables.classes().count(), 2);
    assert!(tables.talents().count() >= 1);
    assert!(config.is_knowledge_trade("arcana"));

    let issues = lint(&tables);
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn bundled_human_barbarian_is_valid() {
    let factory = ContentFactory::bundled();
    let tables = factory.load_tables().unwrap();
    let config = factory.load_config().unwrap();
    let calculator = CharacterCalculator::new(tables.as_env(), &config);

    let evaluation = calculator.evaluate(&human_barbarian()).unwrap();
    let stats = &evaluation.stats;

    assert!(evaluation.report.valid, "{:?}", evaluation.report.messages);
    assert_eq!(stats.combat_mastery, 1);
    assert_eq!(stats.attributes.might, 4);
    assert_eq!(stats.hp_max, 13);
    assert_eq!(stats.save_dc, 13);
    assert_eq!(stats.death_threshold, 11);
    assert_eq!(stats.known.maneuvers, 4);
    assert_eq!(stats.known.techniques, 1);
    assert!(
        stats
            .resistances
            .iter()
            .any(|resistance| resistance.damage_type == "Physical"
                && resistance.modifier == DamageModifier::Half
                && resistance.condition.as_deref() == Some("while raging"))
    );
    assert!(stats.diagnostics.is_empty());
}

#[test]
fn bundled_dwarf_wizard_collects_grants() {
    let factory = ContentFactory::bundled();
    let tables = factory.load_tables().unwrap();
    let config = factory.load_config().unwrap();
    let calculator = CharacterCalculator::new(tables.as_env(), &config);

    let build = CharacterBuildData::new("Brom", "wizard", 1, AttributeScores::new(0, 1, 0, 3))
        .with_ancestry("dwarf")
        .with_trait("dwarf_earthen_knowledge")
        .with_trait("dwarf_thick_skinned")
        .with_trait("dwarf_short_legged");
    let evaluation = calculator.evaluate(&build).unwrap();
    let stats = &evaluation.stats;

    assert_eq!(evaluation.report.spent.ancestry, 5);
    assert_eq!(stats.hp_max, 6 + 1);
    assert_eq!(stats.mp_max, 6 + 3);
    assert_eq!(stats.move_speed, 4);
    assert_eq!(stats.known.cantrips, 2);
    assert_eq!(stats.known.spells, 3);
    assert!(stats.senses.iter().any(|sense| sense.kind == "Darkvision" && sense.range == Some(10)));
    assert!(stats.conditional_modifiers.iter().any(|modifier| modifier.target == "ad"));

    // The spell school is still open
    assert_eq!(stats.diagnostics.pending_choices.len(), 1);
    assert_eq!(
        stats.diagnostics.pending_choices[0].key,
        ChoiceKey::new("spell_school", "school")
    );
    assert!(!evaluation.report.valid);
}

#[test]
fn duplicate_ids_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("traits.ron"),
        r#"(traits: [(id: "a", name: "A", cost: 1), (id: "a", name: "A again", cost: 2)])"#,
    )
    .unwrap();
    fs::write(dir.path().join("ancestries.ron"), "(ancestries: [])").unwrap();
    fs::write(dir.path().join("classes.ron"), "(classes: [])").unwrap();

    let err = ContentFactory::new(dir.path()).load_tables().unwrap_err();
    assert!(err.to_string().contains("duplicate trait id 'a'"));
}

#[test]
fn optional_files_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("traits.ron"), "(traits: [])").unwrap();
    fs::write(
        dir.path().join("ancestries.ron"),
        r#"(ancestries: [(id: "elf", name: "Elf", default_trait_ids: ["elf_grace"])])"#,
    )
    .unwrap();
    fs::write(dir.path().join("classes.ron"), "(classes: [])").unwrap();

    let factory = ContentFactory::new(dir.path());
    let tables = factory.load_tables().unwrap();
    let config = factory.load_config().unwrap();

    assert_eq!(tables.talents().count(), 0);
    assert_eq!(config, character_core::RulesConfig::default());
    assert_eq!(lint(&tables).len(), 1);

    let calculator = CharacterCalculator::new(tables.as_env(), &config);
    let build = CharacterBuildData::new("Ael", "ranger", 1, AttributeScores::default())
        .with_ancestry("elf");
    let stats = calculator.calculate(&build).unwrap();
    assert!(stats.diagnostics.is_missing(ContentKind::Trait, "elf_grace"));
    assert!(stats.diagnostics.is_missing(ContentKind::Class, "ranger"));
}
