//! Terminal rendering of stat sheets and reports.

use anyhow::Result;
use character_core::{CalculatedCharacterStats, ValidationReport};
use console::style;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", style(title).bold().underlined());
}

pub fn print_stats(stats: &CalculatedCharacterStats, breakdown: bool) {
    println!(
        "{} level {} {}",
        style(&stats.name).bold().cyan(),
        stats.level,
        stats.class_name.as_deref().unwrap_or(&stats.class_id)
    );
    if !stats.ancestry_ids.is_empty() {
        println!("Ancestry: {}", stats.ancestry_ids.join(", "));
    }

    section("Core");
    let a = &stats.attributes;
    println!(
        "Might {:>3}   Agility {:>3}   Charisma {:>3}   Intelligence {:>3}",
        a.might, a.agility, a.charisma, a.intelligence
    );
    let s = &stats.saves;
    println!(
        "Saves: Might {:+}  Agility {:+}  Charisma {:+}  Intelligence {:+}",
        s.might, s.agility, s.charisma, s.intelligence
    );
    println!(
        "Combat Mastery {}   Prime {} ({})",
        stats.combat_mastery,
        stats.prime.attribute.label(),
        stats.prime.value
    );

    section("Resources");
    println!(
        "HP {}   SP {}   MP {}   Rest {}   Grit {}",
        stats.hp_max, stats.sp_max, stats.mp_max, stats.rest_points, stats.grit_points
    );

    section("Defense and offense");
    println!(
        "PD {}   AD {}   PDR {}   Save DC {}   Attack {:+}   Initiative {:+}",
        stats.pd, stats.ad, stats.pdr, stats.save_dc, stats.attack_check, stats.initiative
    );
    println!(
        "Death threshold {}   Speed {}   Jump {}",
        stats.death_threshold, stats.move_speed, stats.jump_distance
    );

    section("Budgets");
    println!(
        "Skill {}   Trade {}   Language {}   Ancestry {}   Attribute {}",
        stats.pools.skill,
        stats.pools.trade,
        stats.pools.language,
        stats.pools.ancestry,
        stats.pools.attribute
    );
    println!(
        "Mastery caps: skill {}  trade {}  knowledge {}",
        stats.mastery_limits.skill,
        stats.mastery_limits.trade,
        stats.mastery_limits.knowledge_trade
    );
    for skill in stats.mastery_limits.skill_expertise.keys() {
        println!("  {skill}: {}", stats.mastery_limits.for_skill(skill));
    }
    for (trade, bonus) in &stats.mastery_limits.trade_expertise {
        println!("  {trade}: +{bonus} tier");
    }

    let mut grants: Vec<String> = Vec::new();
    grants.extend(stats.granted_abilities.iter().map(|ability| {
        with_condition(ability.name.clone(), ability.condition.as_deref())
    }));
    grants.extend(stats.resistances.iter().map(|resistance| {
        with_condition(
            format!("Resist {} ({})", resistance.damage_type, resistance.modifier),
            resistance.condition.as_deref(),
        )
    }));
    grants.extend(stats.vulnerabilities.iter().map(|vulnerability| {
        with_condition(
            format!(
                "Vulnerable {} ({})",
                vulnerability.damage_type, vulnerability.modifier
            ),
            vulnerability.condition.as_deref(),
        )
    }));
    grants.extend(stats.senses.iter().map(|sense| match sense.range {
        Some(range) => format!("{} {range}", sense.kind),
        None => sense.kind.clone(),
    }));
    grants.extend(
        stats
            .spells
            .iter()
            .map(|spell| format!("Spell: {}", spell.name)),
    );
    if !stats.combat_training.is_empty() {
        grants.push(format!("Training: {}", stats.combat_training.join(", ")));
    }
    if !grants.is_empty() {
        section("Grants");
        for grant in grants {
            println!("- {grant}");
        }
    }

    if !stats.conditional_modifiers.is_empty() {
        section("Situational");
        for modifier in &stats.conditional_modifiers {
            println!(
                "- {} {:+} {} ({})",
                modifier.target, modifier.amount, modifier.condition, modifier.source.name
            );
        }
    }

    if breakdown {
        section("Breakdown");
        for (stat, breakdown) in &stats.breakdowns {
            let terms: Vec<String> = breakdown
                .entries
                .iter()
                .map(|entry| format!("{} {:+}", entry.label, entry.amount))
                .collect();
            println!("{:<18} {:>4} = {}", stat.to_string(), breakdown.value, terms.join(", "));
        }
    }

    let messages = stats.diagnostics.messages();
    if !messages.is_empty() {
        section("Diagnostics");
        for message in messages {
            println!("{} {message}", style("!").yellow());
        }
    }
}

fn with_condition(text: String, condition: Option<&str>) -> String {
    match condition {
        Some(condition) => format!("{text} {condition}"),
        None => text,
    }
}

pub fn print_report(report: &ValidationReport) {
    if report.valid {
        println!("{} Build is valid", style("✓").green().bold());
    } else {
        println!("{} Build is not valid", style("✗").red().bold());
        for message in &report.messages {
            println!("  - {message}");
        }
    }
    println!(
        "Spent: skill {}/{}  trade {}/{}  language {}/{}  ancestry {}/{}  attribute {}/{}",
        report.spent.skill,
        report.available.skill,
        report.spent.trade,
        report.available.trade,
        report.spent.language,
        report.available.language,
        report.spent.ancestry,
        report.available.ancestry,
        report.spent.attribute,
        report.available.attribute
    );
}
