use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use cpack_store::{read_pack, rebuild_pack, PackConfig, ResolutionMode};
use cpack_types::{Document, Folder};

use crate::cli::*;
use crate::manifest::Manifest;
use crate::output::to_sorted_pretty_json;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref(), cli.strict)?;
    match cli.command {
        Command::Extract(args) => cmd_extract(args, &config),
        Command::Build(args) => cmd_build(args, &config),
    }
}

fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<PackConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PackConfig::default(),
    };
    if strict {
        config.resolution = ResolutionMode::Strict;
    }
    Ok(config)
}

fn cmd_extract(args: ExtractArgs, config: &PackConfig) -> anyhow::Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    println!("Extracting packs from {} to {}", args.manifest.display(), args.out.display().to_string().bold());

    for pack in &manifest.packs {
        let dir = manifest.pack_dir(pack);
        let contents = read_pack(&dir, &pack.document_type, config)
            .with_context(|| format!("extracting pack {} ({})", pack.name, pack.document_type))?;

        let folders_file = args.out.join(format!("{}_folders.json", pack.name));
        std::fs::write(&folders_file, to_sorted_pretty_json(&contents.folders)?)?;
        let docs_file = args.out.join(format!("{}.json", pack.name));
        std::fs::write(&docs_file, serde_json::to_string(&contents.documents)?)?;

        println!(
            "  {} {} ({}): {} documents, {} folders",
            "✓".green(),
            pack.name.bold(),
            pack.document_type.cyan(),
            contents.documents.len(),
            contents.folders.len(),
        );
        if !contents.report.is_clean() {
            println!(
                "    {} {} unresolved embedded references dropped",
                "!".yellow().bold(),
                contents.report.missing.len(),
            );
        }
    }
    Ok(())
}

fn cmd_build(args: BuildArgs, config: &PackConfig) -> anyhow::Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    println!("Building packs from {}", args.extracted.display().to_string().bold());

    for pack in &manifest.packs {
        let docs_file = args.extracted.join(format!("{}.json", pack.name));
        let raw = std::fs::read_to_string(&docs_file)
            .with_context(|| format!("reading {}", docs_file.display()))?;
        let documents: Vec<Document> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", docs_file.display()))?;

        let folders_file = args.extracted.join(format!("{}_folders.json", pack.name));
        let folders: Vec<Folder> = if folders_file.is_file() {
            let raw = std::fs::read_to_string(&folders_file)?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", folders_file.display()))?
        } else {
            tracing::debug!(pack = %pack.name, "no folders file");
            Vec::new()
        };

        let dir = manifest.pack_dir(pack);
        let summary = rebuild_pack(&dir, &pack.document_type, &documents, &folders, config)
            .with_context(|| format!("building pack {} ({})", pack.name, pack.document_type))?;

        println!(
            "  {} {} ({}): {} documents, {} embedded, {} folders",
            "✓".green(),
            pack.name.bold(),
            pack.document_type.cyan(),
            summary.documents,
            summary.embedded,
            summary.folders,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use cpack_types::DocumentType;
    use serde_json::json;

    fn write_manifest(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("module.json");
        std::fs::write(
            &path,
            r#"{"packs": [
                {"name": "monsters", "label": "Monsters", "path": "packs/monsters.db", "type": "Actor"},
                {"name": "gear", "label": "Gear", "path": "packs/gear.db", "type": "Item"}
            ]}"#,
        )
        .unwrap();
        path
    }

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["cpack"];
        argv.extend_from_slice(args);
        run_command(Cli::parse_from(argv))
    }

    #[test]
    fn build_then_extract() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_manifest(dir.path());
        let input = dir.path().join("input");
        std::fs::create_dir_all(&input).unwrap();

        let monsters = json!([{"_id": "gob", "name": "Goblin", "items": [{"_id": "dag", "name": "Dagger"}]}]);
        std::fs::write(input.join("monsters.json"), monsters.to_string()).unwrap();
        std::fs::write(input.join("gear.json"), r#"[{"_id": "rope", "name": "Rope"}]"#).unwrap();
        let folders = vec![Folder::new("f1", "Tools", 0, DocumentType::Item)];
        std::fs::write(input.join("gear_folders.json"), serde_json::to_string(&folders).unwrap()).unwrap();

        run(&["build", manifest.to_str().unwrap(), input.to_str().unwrap()]).unwrap();
        assert!(dir.path().join("packs/monsters/pack.redb").is_file());

        let out = dir.path().join("out");
        run(&["extract", manifest.to_str().unwrap(), out.to_str().unwrap()]).unwrap();

        let extracted: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("monsters.json")).unwrap()).unwrap();
        assert_eq!(extracted, monsters);

        let folders_text = std::fs::read_to_string(out.join("gear_folders.json")).unwrap();
        assert!(folders_text.ends_with("]\n"));
        let back: Vec<Folder> = serde_json::from_str(&folders_text).unwrap();
        assert_eq!(back, folders);

        let empty: Vec<Folder> =
            serde_json::from_str(&std::fs::read_to_string(out.join("monsters_folders.json")).unwrap()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn unknown_pack_type_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("module.json");
        std::fs::write(&manifest, r#"{"packs": [{"name": "s", "path": "packs/s.db", "type": "Spell"}]}"#).unwrap();
        let input = dir.path().join("input");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("s.json"), "[]").unwrap();

        let err = run(&["build", manifest.to_str().unwrap(), input.to_str().unwrap()]).unwrap_err();
        let pack_err = err.downcast_ref::<cpack_store::PackError>().unwrap();
        assert!(pack_err.is_configuration());
        assert!(!dir.path().join("packs/s").exists());
    }

    #[test]
    fn extract_missing_pack_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = write_manifest(dir.path());
        let out = dir.path().join("out");
        assert!(run(&["extract", manifest.to_str().unwrap(), out.to_str().unwrap()]).is_err());
    }

    #[test]
    fn config_file_and_strict_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.toml");
        std::fs::write(&path, "file_name = \"data.redb\"\n").unwrap();

        let config = load_config(Some(&path), false).unwrap();
        assert_eq!(config.file_name, "data.redb");
        assert_eq!(config.resolution, ResolutionMode::Tolerant);

        let config = load_config(None, true).unwrap();
        assert_eq!(config.resolution, ResolutionMode::Strict);
    }
}
