use crate::{
    compile::{looks_hashed, tags, write_partial, AssetKind, Manifest, Mode, Written},
    config::{Config, Variant},
    error::Error,
    internal_prelude::*,
    logger::GRAY,
};
use camino::Utf8PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialReport {
    pub kind: AssetKind,
    pub path: Utf8PathBuf,
    pub tags: usize,
    pub written: Written,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub variant: String,
    pub partials: Vec<PartialReport>,
}

/// Builds every configured variant in order, stopping at the first failure.
pub fn build_all(config: &Config) -> Result<Vec<BuildReport>> {
    let mut reports = Vec::with_capacity(config.variants.len());
    for variant in &config.variants {
        let report = build_partials(variant, config.mode)
            .wrap_err_with(|| format!("Could not build the partials of variant {:?}", variant.name))?;
        reports.push(report);
    }

    let updated = reports
        .iter()
        .flat_map(|r| &r.partials)
        .filter(|p| p.written == Written::Updated)
        .count();
    info!(
        "Finished {} variant(s), {updated} partial(s) updated",
        reports.len()
    );
    Ok(reports)
}

/// Reads both manifests and renders both tag lists before writing anything,
/// so a missing or invalid manifest leaves the partials as they were.
pub fn build_partials(variant: &Variant, mode: Mode) -> Result<BuildReport, Error> {
    info!("Build {} partials for variant {}", mode, variant.name);

    let mut rendered = Vec::with_capacity(2);
    for kind in [AssetKind::Css, AssetKind::Js] {
        let slot = variant.slot(kind);
        let manifest = Manifest::read(kind, &slot.manifest)?;
        if mode.is_production() {
            warn_unhashed(kind, &manifest);
        }
        rendered.push((kind, tags(kind, &manifest, &slot.base)?));
    }

    let mut partials = Vec::with_capacity(rendered.len());
    for (kind, tags) in rendered {
        let slot = variant.slot(kind);
        let written = write_partial(kind, &tags, &slot.partial)?;
        debug!(
            "Partial {kind} {written} with {} tag(s) {}",
            tags.len(),
            GRAY.paint(slot.partial.as_str())
        );
        partials.push(PartialReport {
            kind,
            path: slot.partial.clone(),
            tags: tags.len(),
            written,
        });
    }

    Ok(BuildReport {
        variant: variant.name.clone(),
        partials,
    })
}

fn warn_unhashed(kind: AssetKind, manifest: &Manifest) {
    for (name, file) in manifest.iter() {
        if !looks_hashed(file) {
            warn!("Manifest {kind} entry {name:?} points to {file:?} which has no content hash");
        }
    }
}
