//! Parameter listing.

#![allow(clippy::print_literal)] // Table headers use literal strings

use std::path::PathBuf;

use ambit_core::{ParamDescriptor, ParamKind, ParamUnit};
use ambit_engine::{Engine, EngineConfig, Param};
use anyhow::Context;
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter key
    #[arg(value_name = "KEY")]
    key: Option<String>,

    /// Show values after applying this config's overrides
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let engine = match &args.config {
        Some(path) => {
            let config = EngineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            Engine::from_config(&config)?
        }
        None => Engine::new(),
    };

    if let Some(key) = &args.key {
        let param = Param::from_key(key).ok_or_else(|| anyhow::anyhow!("Unknown parameter: {key}"))?;
        print_details(param, engine.get(param));
        return Ok(());
    }

    println!(
        "  {:14}  {:14}  {:7}  {:34}  {:6}  {:10}  {}",
        "Key", "Name", "Kind", "Range", "Step", "Default", "Value"
    );
    println!(
        "  {:14}  {:14}  {:7}  {:34}  {:6}  {:10}  {}",
        "---", "----", "----", "-----", "----", "-------", "-----"
    );
    for param in Param::ALL {
        let d = param.descriptor();
        println!(
            "  {:14}  {:14}  {:7}  {:34}  {:6}  {:10}  {}",
            param.key(),
            d.name,
            kind_name(d.kind),
            range(&d),
            step(&d),
            d.format_value(d.default),
            d.format_value(engine.get(param)),
        );
    }
    Ok(())
}

fn print_details(param: Param, value: f32) {
    let d = param.descriptor();
    println!("{} ({})", param.key(), d.name);
    println!("{}", "=".repeat(param.key().len() + d.name.len() + 3));
    println!();
    println!("  Kind:     {}", kind_name(d.kind));
    println!("  Range:    {}", range(&d));
    println!("  Step:     {}", step(&d));
    println!("  Default:  {}", d.format_value(d.default));
    println!("  Value:    {}", d.format_value(value));
    if d.kind == ParamKind::Choice {
        println!();
        println!("  Entries:");
        for (i, label) in d.step_labels.iter().enumerate() {
            println!("    {}  {}", d.min as usize + i, label);
        }
    }
    println!();
    println!("Example:");
    println!(
        "  ambit render in.wav out.wav --param {}={}",
        param.key(),
        d.format_value(d.default).replace(' ', "")
    );
}

fn kind_name(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Float => "float",
        ParamKind::Bool => "bool",
        ParamKind::Choice => "choice",
    }
}

fn range(d: &ParamDescriptor) -> String {
    match d.kind {
        ParamKind::Bool => "off, on".to_string(),
        ParamKind::Choice => d.step_labels.join(", "),
        ParamKind::Float => match d.unit {
            ParamUnit::Percent => format!("{:.0}% .. {:.0}%", d.min * 100.0, d.max * 100.0),
            unit => format!("{} .. {}{}", d.min, d.max, unit.suffix()),
        },
    }
}

fn step(d: &ParamDescriptor) -> String {
    if d.step > 0.0 {
        format!("{}", d.step)
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_read_naturally() {
        assert_eq!(range(&Param::Cutoff.descriptor()), "20 .. 20000 Hz");
        assert_eq!(range(&Param::RoomSize.descriptor()), "0% .. 100%");
        assert_eq!(
            range(&Param::FilterMenu.descriptor()),
            "Low Pass, Band Pass, High Pass, Off"
        );
        assert_eq!(range(&Param::FreezeMode.descriptor()), "off, on");
        assert_eq!(range(&Param::Feedback.descriptor()), "-1 .. 1");
    }

    #[test]
    fn kinds_are_named() {
        assert_eq!(kind_name(Param::Gain.descriptor().kind), "float");
        assert_eq!(kind_name(Param::ReverbBypass.descriptor().kind), "bool");
        assert_eq!(kind_name(Param::PhaserMenu.descriptor().kind), "choice");
    }

    #[test]
    fn continuous_params_have_no_step() {
        assert_eq!(step(&Param::Cutoff.descriptor()), "-");
        assert_eq!(step(&Param::CentreDelay.descriptor()), "0.1");
    }
}
