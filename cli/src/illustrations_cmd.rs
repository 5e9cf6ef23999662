use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use illustra_backend_client::models::FileType;
use illustra_backend_client::models::Id;
use illustra_backend_client::models::Illustration;
use illustra_backend_client::models::IllustrationDetail;
use illustra_backend_client::models::IllustrationFile;
use illustra_backend_client::models::IllustrationPatch;
use illustra_backend_client::models::NewIllustration;
use illustra_backend_client::models::UploadFile;
use illustra_backend_client::query::IllustrationFileQuery;
use illustra_backend_client::query::IllustrationQuery;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;

use crate::AppContext;
use crate::browse_cmd::ListArgs;
use crate::output::or_dash;
use crate::output::print_json;
use crate::output::print_table;
use crate::output::success;

#[derive(Debug, clap::Parser)]
pub struct IllustrationsCli {
    #[command(subcommand)]
    pub subcommand: IllustrationsSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum IllustrationsSubcommand {
    /// List illustrations, newest first unless --ordering says otherwise.
    List(ListIllustrationsArgs),

    /// Show one illustration with its files.
    Show { id: Id },

    /// List illustration files.
    Files(FilesArgs),

    /// Upload a new illustration.
    Create(CreateArgs),

    /// Replace every field of an illustration, uploading files again.
    Update {
        id: Id,
        #[command(flatten)]
        fields: CreateArgs,
    },

    /// Change only the given fields.
    Patch(PatchArgs),

    /// Delete an illustration and its files.
    Delete { id: Id },

    /// Attach more files to an existing illustration.
    AddFiles {
        id: Id,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Remove one file from an illustration.
    DeleteFile { id: Id, file_id: Id },

    /// Delete an illustration file by its own id.
    RemoveFile { file_id: Id },

    /// Delete several illustrations at once.
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<Id>,
    },

    /// Catalog-wide counters.
    Stats,

    /// Download an illustration file.
    Download(FetchFileArgs),

    /// Fetch the inline preview of an illustration file.
    Preview(FetchFileArgs),
}

#[derive(Debug, clap::Args)]
pub struct ListIllustrationsArgs {
    #[arg(long)]
    pub manufacturer: Option<Id>,

    #[arg(long)]
    pub engine_model: Option<Id>,

    #[arg(long)]
    pub car_model: Option<Id>,

    #[arg(long)]
    pub part_category: Option<Id>,

    #[arg(long)]
    pub part_subcategory: Option<Id>,

    /// Embed file metadata in each result.
    #[arg(long)]
    pub include_files: bool,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, clap::Args)]
pub struct FilesArgs {
    #[arg(long)]
    pub illustration: Option<Id>,

    /// `image`, `pdf` or `other`.
    #[arg(long, value_parser = parse_file_type)]
    pub file_type: Option<FileType>,
}

#[derive(Debug, clap::Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long)]
    pub engine_model: Id,

    #[arg(long)]
    pub part_category: Id,

    #[arg(long)]
    pub part_subcategory: Option<Id>,

    /// Car model this illustration applies to; repeatable.
    #[arg(long = "car-model", value_name = "ID")]
    pub car_models: Vec<Id>,

    /// File to upload; repeatable.
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct PatchArgs {
    pub id: Id,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub engine_model: Option<Id>,

    #[arg(long)]
    pub part_category: Option<Id>,

    #[arg(long)]
    pub part_subcategory: Option<Id>,

    /// Replaces the applicable car models; repeatable.
    #[arg(long = "car-model", value_name = "ID")]
    pub car_models: Vec<Id>,
}

#[derive(Debug, clap::Args)]
pub struct FetchFileArgs {
    /// Illustration file id.
    pub file_id: Id,

    /// Destination path. Defaults to the original file name in the
    /// current directory.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn parse_file_type(value: &str) -> Result<FileType, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "image" => Ok(FileType::Image),
        "pdf" => Ok(FileType::Pdf),
        "other" => Ok(FileType::Other),
        other => Err(format!("unknown file type `{other}`; expected image, pdf or other")),
    }
}

impl IllustrationsCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let client = &ctx.client;
        match self.subcommand {
            IllustrationsSubcommand::List(args) => {
                let mut query = IllustrationQuery {
                    manufacturer: args.manufacturer,
                    engine_model: args.engine_model,
                    car_model: args.car_model,
                    part_category: args.part_category,
                    part_subcategory: args.part_subcategory,
                    include_files: args.include_files,
                    list: args.list.into(),
                };
                if query.list.ordering.is_none() {
                    query.list.ordering = IllustrationQuery::newest_first().list.ordering;
                }
                let page = client.list_illustrations(&query).await?;
                print_illustrations(ctx, page.items())
            }
            IllustrationsSubcommand::Show { id } => {
                let detail = client.get_illustration(id).await?;
                print_detail(ctx, &detail)
            }
            IllustrationsSubcommand::Files(args) => {
                let query = IllustrationFileQuery {
                    illustration: args.illustration,
                    file_type: args.file_type,
                };
                let page = client.list_illustration_files(&query).await?;
                print_files(ctx, page.items())
            }
            IllustrationsSubcommand::Create(args) => {
                let input = new_illustration(args).await?;
                let detail = client
                    .create_illustration(&input)
                    .await
                    .context("failed to create illustration")?;
                report_saved(ctx, "Created", &detail)
            }
            IllustrationsSubcommand::Update { id, fields } => {
                let input = new_illustration(fields).await?;
                let detail = client
                    .update_illustration(id, &input)
                    .await
                    .context("failed to update illustration")?;
                report_saved(ctx, "Updated", &detail)
            }
            IllustrationsSubcommand::Patch(args) => {
                let id = args.id;
                let patch = IllustrationPatch {
                    title: args.title,
                    description: args.description,
                    engine_model: args.engine_model,
                    part_category: args.part_category,
                    part_subcategory: args.part_subcategory,
                    applicable_car_models: (!args.car_models.is_empty()).then_some(args.car_models),
                };
                if patch == IllustrationPatch::default() {
                    bail!("nothing to change; pass at least one field");
                }
                let detail = client
                    .patch_illustration(id, &patch)
                    .await
                    .context("failed to update illustration")?;
                report_saved(ctx, "Updated", &detail)
            }
            IllustrationsSubcommand::Delete { id } => {
                client
                    .delete_illustration(id)
                    .await
                    .with_context(|| format!("failed to delete illustration {id}"))?;
                report_done(ctx, json!({ "deleted": id }), format!("Deleted illustration {id}"))
            }
            IllustrationsSubcommand::AddFiles { id, files } => {
                let uploads = read_uploads(&files).await?;
                let response = client
                    .add_illustration_files(id, &uploads)
                    .await
                    .context("failed to upload files")?;
                if ctx.json {
                    return print_json(&response);
                }
                success(format!("Uploaded {} file(s) to illustration {id}", uploads.len()));
                Ok(())
            }
            IllustrationsSubcommand::DeleteFile { id, file_id } => {
                client
                    .delete_illustration_file(id, file_id)
                    .await
                    .with_context(|| format!("failed to delete file {file_id}"))?;
                report_done(
                    ctx,
                    json!({ "illustration": id, "deleted_file": file_id }),
                    format!("Deleted file {file_id} from illustration {id}"),
                )
            }
            IllustrationsSubcommand::RemoveFile { file_id } => {
                client
                    .delete_illustration_file_by_id(file_id)
                    .await
                    .with_context(|| format!("failed to delete file {file_id}"))?;
                report_done(
                    ctx,
                    json!({ "deleted_file": file_id }),
                    format!("Deleted file {file_id}"),
                )
            }
            IllustrationsSubcommand::BulkDelete { ids } => {
                let response = client
                    .bulk_delete_illustrations(&ids)
                    .await
                    .context("bulk delete failed")?;
                if ctx.json {
                    return print_json(&response);
                }
                success(format!("Deleted {} illustration(s)", ids.len()));
                Ok(())
            }
            IllustrationsSubcommand::Stats => {
                let stats = client.illustration_stats().await?;
                if ctx.json {
                    return print_json(&stats);
                }
                println!("{} {}", "total:".bold(), stats.total);
                for (key, value) in &stats.extra {
                    println!("{} {value}", format!("{key}:").bold());
                }
                Ok(())
            }
            IllustrationsSubcommand::Download(args) => fetch_file(ctx, args, false).await,
            IllustrationsSubcommand::Preview(args) => fetch_file(ctx, args, true).await,
        }
    }
}

async fn read_uploads(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .with_context(|| format!("{} is not a file", path.display()))?;
        debug!(file = %file_name, bytes = content.len(), "prepared upload");
        uploads.push(UploadFile::new(file_name, content));
    }
    Ok(uploads)
}

async fn new_illustration(args: CreateArgs) -> Result<NewIllustration> {
    let uploaded_files = read_uploads(&args.files).await?;
    Ok(NewIllustration {
        title: args.title,
        description: args.description,
        engine_model: args.engine_model,
        part_category: args.part_category,
        part_subcategory: args.part_subcategory,
        applicable_car_models: args.car_models,
        uploaded_files,
    })
}

async fn fetch_file(ctx: &AppContext, args: FetchFileArgs, preview: bool) -> Result<()> {
    let client = &ctx.client;
    let destination = match args.output {
        Some(path) => path,
        None => {
            let file = client.get_illustration_file(args.file_id).await?;
            default_destination(&file)
        }
    };
    let bytes = if preview {
        client.preview_illustration_file(args.file_id).await?
    } else {
        client.download_illustration_file(args.file_id).await?
    };
    write_file(&destination, &bytes).await?;
    report_done(
        ctx,
        json!({ "file": args.file_id, "path": destination, "bytes": bytes.len() }),
        format!("Saved {} bytes to {}", bytes.len(), destination.display()),
    )
}

fn default_destination(file: &IllustrationFile) -> PathBuf {
    let name = file
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("illustration-file-{}", file.id));
    PathBuf::from(name)
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

fn report_done(ctx: &AppContext, value: serde_json::Value, message: String) -> Result<()> {
    if ctx.json {
        return print_json(&value);
    }
    success(message);
    Ok(())
}

fn report_saved(ctx: &AppContext, verb: &str, detail: &IllustrationDetail) -> Result<()> {
    if ctx.json {
        return print_json(detail);
    }
    success(format!(
        "{verb} illustration {} \"{}\"",
        detail.illustration.id, detail.illustration.title
    ));
    Ok(())
}

fn print_illustrations(ctx: &AppContext, illustrations: &[Illustration]) -> Result<()> {
    if ctx.json {
        return print_json(illustrations);
    }
    if illustrations.is_empty() {
        println!("No illustrations found.");
        return Ok(());
    }
    let rows: Vec<[String; 6]> = illustrations
        .iter()
        .map(|i| {
            [
                i.id.to_string(),
                i.title.clone(),
                or_dash(i.engine_model_name.as_ref()),
                or_dash(i.part_category_name.as_ref()),
                or_dash(i.part_subcategory_name.as_ref()),
                or_dash(i.file_count.or(Some(i.files.len() as u64))),
            ]
        })
        .collect();
    print_table(
        ["ID", "Title", "Engine", "Category", "Subcategory", "Files"],
        &rows,
    );
    Ok(())
}

fn print_detail(ctx: &AppContext, detail: &IllustrationDetail) -> Result<()> {
    if ctx.json {
        return print_json(detail);
    }
    let i = &detail.illustration;
    println!("{} {}", format!("#{}", i.id).bold(), i.title.bold());
    if !i.description.is_empty() {
        println!("{}", i.description);
    }
    println!("Engine:       {}", or_dash(i.engine_model_name.as_ref()));
    println!("Manufacturer: {}", or_dash(i.manufacturer_name.as_ref()));
    println!("Category:     {}", or_dash(i.part_category_name.as_ref()));
    println!("Subcategory:  {}", or_dash(i.part_subcategory_name.as_ref()));
    println!(
        "Car models:   {}",
        if i.applicable_car_models.is_empty() {
            "-".to_string()
        } else {
            i.applicable_car_models
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!(
        "Uploaded by:  {}",
        or_dash(i.user_name.as_ref().or(detail.user_email.as_ref()))
    );
    if let Some(created_at) = i.created_at {
        println!("Created:      {}", created_at.to_rfc3339());
    }
    println!();
    print_files(ctx, detail.files())
}

fn print_files(ctx: &AppContext, files: &[IllustrationFile]) -> Result<()> {
    if ctx.json {
        return print_json(files);
    }
    if files.is_empty() {
        println!("No files.");
        return Ok(());
    }
    let rows: Vec<[String; 4]> = files
        .iter()
        .map(|f| {
            [
                f.id.to_string(),
                or_dash(f.file_name.as_ref().or(f.title.as_ref())),
                f.file_type.to_string(),
                f.file_size.to_string(),
            ]
        })
        .collect();
    print_table(["ID", "Name", "Type", "Bytes"], &rows);
    Ok(())
}
