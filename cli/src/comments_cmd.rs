use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use illustra_backend_client::models::Id;
use illustra_backend_client::models::NewComment;
use illustra_backend_client::models::comment::MAX_STARS;
use illustra_backend_client::models::comment::MIN_STARS;
use serde_json::json;

use crate::AppContext;
use crate::output::or_dash;
use crate::output::print_json;
use crate::output::print_table;
use crate::output::success;

#[derive(Debug, clap::Parser)]
pub struct CommentsCli {
    #[command(subcommand)]
    pub subcommand: CommentsSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum CommentsSubcommand {
    /// List feedback comments.
    List,

    /// Post a feedback comment.
    Create {
        #[arg(long)]
        department: String,

        #[arg(long)]
        comment: String,

        /// Rating from 1 to 5.
        #[arg(long, default_value_t = 5)]
        star: u8,
    },

    /// Delete a comment.
    Delete { id: Id },
}

impl CommentsCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let client = &ctx.client;
        match self.subcommand {
            CommentsSubcommand::List => {
                let comments = client.list_comments().await?.into_items();
                if ctx.json {
                    return print_json(&comments);
                }
                if comments.is_empty() {
                    println!("No comments.");
                    return Ok(());
                }
                let rows: Vec<[String; 5]> = comments
                    .iter()
                    .map(|c| {
                        [
                            c.id.to_string(),
                            c.department_name.clone(),
                            "*".repeat(usize::from(c.star)),
                            or_dash(c.user_name.as_ref()),
                            c.comment.clone(),
                        ]
                    })
                    .collect();
                print_table(["ID", "Department", "Stars", "User", "Comment"], &rows);
                Ok(())
            }
            CommentsSubcommand::Create {
                department,
                comment,
                star,
            } => {
                if !(MIN_STARS..=MAX_STARS).contains(&star) {
                    bail!("--star must be between {MIN_STARS} and {MAX_STARS}");
                }
                let created = client
                    .create_comment(&NewComment::new(department, comment, star))
                    .await
                    .context("failed to post comment")?;
                if ctx.json {
                    return print_json(&created);
                }
                success(format!("Posted comment {}", created.id));
                Ok(())
            }
            CommentsSubcommand::Delete { id } => {
                client
                    .delete_comment(id)
                    .await
                    .with_context(|| format!("failed to delete comment {id}"))?;
                if ctx.json {
                    return print_json(&json!({ "deleted": id }));
                }
                success(format!("Deleted comment {id}"));
                Ok(())
            }
        }
    }
}
