//! # Catalog: catalog versions and requirement listings.

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;

use orbit_core::Framework;
use orbit_rules::{catalog_info, catalog_summaries, CatalogInfo, RequirementSummary};

use crate::{render, OutputFormat, EXIT_OK};

/// Arguments for `orbit catalog`.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// List one framework's requirements. Without it, summarize every catalog.
    pub framework: Option<String>,
}

/// Execute `orbit catalog`.
pub fn run_catalog(args: &CatalogArgs, format: OutputFormat) -> Result<u8> {
    match &args.framework {
        Some(name) => {
            let framework: Framework = name.parse()?;
            let requirements = catalog_summaries(framework);
            println!("{}", render(format, &requirements, render_requirements)?);
        }
        None => {
            let infos = Framework::all()
                .iter()
                .map(|f| catalog_info(*f))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", render(format, &infos, render_infos)?);
        }
    }
    Ok(EXIT_OK)
}

/// One line per catalog.
pub fn render_infos(infos: &Vec<CatalogInfo>) -> String {
    let mut out = String::new();
    for i in infos {
        let _ = writeln!(
            out,
            "{:<15} {:<10} {:>3} requirements  {}",
            i.framework.to_string(),
            i.version,
            i.requirement_count,
            &i.digest[..i.digest.len().min(12)]
        );
    }
    out
}

/// One line per requirement.
pub fn render_requirements(requirements: &Vec<RequirementSummary>) -> String {
    let mut out = String::new();
    for r in requirements {
        let _ = writeln!(
            out,
            "[{:<8}] {:<22} {:<18} {}",
            r.severity.to_string(),
            r.id,
            r.article,
            r.title
        );
    }
    out
}
