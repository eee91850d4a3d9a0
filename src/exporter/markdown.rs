// file: src/exporter/markdown.rs
// description: writes published posts to disk as markdown with front matter
// reference: https://jekyllrb.com/docs/front-matter/

use crate::converter::{excerpt, render_html};
use crate::error::Result;
use crate::exporter::progress::{ExportProgress, ExportStats};
use crate::models::{MarkdownBundle, PostMetadata};
use crate::posts::PostRepository;
use crate::utils::Validator;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const MANIFEST_FILE: &str = "index.json";
const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub pretty: bool,
    pub html: bool,
    pub show_progress: bool,
    pub colored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedPost {
    pub slug: String,
    pub title: String,
    pub path: String,
    pub html_path: Option<String>,
    pub sha256: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_posts: usize,
    pub failed_posts: Vec<String>,
    pub files: Vec<ExportedPost>,
}

#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    output_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        Validator::validate_directory(&output_dir)?;
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports every published post. A post that fails to fetch is logged and
    /// recorded in the manifest; local write failures abort the run.
    pub async fn export_all(
        &self,
        repository: &PostRepository,
        options: &ExportOptions,
    ) -> Result<(ExportManifest, ExportStats)> {
        info!("Starting export to {}", self.output_dir.display());

        let posts = repository.list_published().await?;

        let mut progress = if options.show_progress {
            ExportProgress::new(posts.len(), options.colored)
        } else {
            ExportProgress::hidden()
        };

        let mut exported = Vec::with_capacity(posts.len());
        let mut failed = Vec::new();
        let mut stems = HashSet::new();

        for metadata in posts {
            progress.start_post(&metadata.slug);
            let slug = metadata.slug.clone();

            match repository.bundle_for(metadata).await {
                Ok(bundle) => {
                    let stem = unique_stem(&bundle.metadata.slug, &mut stems);
                    let post = self.write_post_as(&bundle, &stem, options)?;
                    progress.post_exported(post.bytes);
                    exported.push(post);
                }
                Err(e) => {
                    warn!("Failed to export post '{}': {}", slug, e);
                    progress.post_failed();
                    failed.push(slug);
                }
            }
        }

        progress.finish();

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_posts: exported.len(),
            failed_posts: failed,
            files: exported,
        };
        self.write_manifest(&manifest, options.pretty)?;

        info!(
            "Export complete: {} posts written, {} failed",
            manifest.total_posts,
            manifest.failed_posts.len()
        );
        Ok((manifest, progress.stats()))
    }

    /// Writes `<slug>.md` (and `<slug>.html` when requested) for one post.
    pub fn write_post(&self, bundle: &MarkdownBundle, options: &ExportOptions) -> Result<ExportedPost> {
        let stem = Validator::sanitize_file_name(&bundle.metadata.slug);
        self.write_post_as(bundle, &stem, options)
    }

    fn write_post_as(
        &self,
        bundle: &MarkdownBundle,
        stem: &str,
        options: &ExportOptions,
    ) -> Result<ExportedPost> {
        let body = bundle.render();

        let document = format!(
            "{}\n{}\n",
            front_matter(&bundle.metadata, &excerpt(&body, EXCERPT_CHARS))?,
            body
        );

        let file_name = format!("{}.md", stem);
        fs::write(self.output_dir.join(&file_name), &document)?;

        let html_path = if options.html {
            let html_name = format!("{}.html", stem);
            fs::write(self.output_dir.join(&html_name), render_html(&body))?;
            Some(html_name)
        } else {
            None
        };

        Ok(ExportedPost {
            slug: bundle.metadata.slug.clone(),
            title: bundle.metadata.title.clone(),
            path: file_name,
            html_path,
            sha256: compute_hash(&document),
            bytes: document.len() as u64,
        })
    }

    pub fn write_manifest(&self, manifest: &ExportManifest, pretty: bool) -> Result<PathBuf> {
        let json = if pretty {
            serde_json::to_string_pretty(manifest)?
        } else {
            serde_json::to_string(manifest)?
        };

        let path = self.output_dir.join(MANIFEST_FILE);
        fs::write(&path, json)?;
        Ok(path)
    }
}

/// Sanitized file stem for `slug`, suffixed with `-2`, `-3`, ... when an
/// earlier post in the same run already took it.
fn unique_stem(slug: &str, taken: &mut HashSet<String>) -> String {
    let base = Validator::sanitize_file_name(slug);
    let mut stem = base.clone();
    let mut n = 1;
    while !taken.insert(stem.clone()) {
        n += 1;
        stem = format!("{}-{}", base, n);
    }
    if n > 1 {
        warn!("File name {} already used, writing '{}' as {}", base, slug, stem);
    }
    stem
}

fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// YAML front matter block. Values are written as JSON scalars and arrays,
/// which YAML reads verbatim.
pub fn front_matter(metadata: &PostMetadata, excerpt: &str) -> Result<String> {
    let fields = [
        ("id", serde_json::to_string(&metadata.id)?),
        ("title", serde_json::to_string(&metadata.title)?),
        ("slug", serde_json::to_string(&metadata.slug)?),
        ("date", serde_json::to_string(&metadata.date)?),
        (
            "last_edited_time",
            serde_json::to_string(&metadata.last_edited_time)?,
        ),
        ("tags", serde_json::to_string(&metadata.tags)?),
        ("description", serde_json::to_string(&metadata.description)?),
        ("thumbnail", serde_json::to_string(&metadata.thumbnail)?),
        ("excerpt", serde_json::to_string(excerpt)?),
    ];

    let mut out = String::from("---\n");
    for (key, value) in fields {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    out.push_str("---");
    Ok(out)
}
