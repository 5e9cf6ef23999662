use std::str::FromStr;

use anyhow::Context;
use anyhow::Result;
use illustra_backend_client::Client;
use illustra_backend_client::models::Id;
use illustra_backend_client::query::CarModelQuery;
use illustra_backend_client::query::EngineModelQuery;
use illustra_backend_client::query::ListOptions;
use illustra_backend_client::query::PartCategoryQuery;
use illustra_navigator::CatalogSource;
use illustra_navigator::Crumb;
use illustra_navigator::FilterResolver;
use illustra_navigator::Level;
use illustra_navigator::LoadStatus;
use illustra_navigator::NavState;
use illustra_navigator::ResolverOptions;
use illustra_navigator::Route;
use illustra_navigator::Selection;
use illustra_navigator::breadcrumbs;
use illustra_navigator::navigation::visible_subcategories;
use illustra_navigator::resolve_context;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

use crate::AppContext;
use crate::output::print_json;
use crate::output::print_table;

/// An id flag that can also name "no selection" explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalId(pub Option<Id>);

impl FromStr for OptionalId {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case("none")
            || value.eq_ignore_ascii_case("null")
        {
            return Ok(OptionalId(None));
        }
        value
            .parse::<Id>()
            .map(|id| OptionalId(Some(id)))
            .map_err(|_| format!("expected an id or `none`, got `{value}`"))
    }
}

#[derive(Debug, clap::Args)]
pub struct ResolveArgs {
    #[arg(long, value_name = "ID")]
    pub manufacturer: Option<OptionalId>,

    #[arg(long, value_name = "ID")]
    pub car_model: Option<OptionalId>,

    #[arg(long, value_name = "ID")]
    pub engine_model: Option<OptionalId>,

    #[arg(long, value_name = "ID")]
    pub part_category: Option<OptionalId>,

    #[arg(long, value_name = "ID")]
    pub part_subcategory: Option<OptionalId>,

    /// Keep the chosen part category when the engine changes.
    #[arg(long)]
    pub keep_parts: bool,
}

#[derive(Debug, clap::Args)]
pub struct RouteArgs {
    /// Page path, e.g. `/cars/hiace/categories/1000/subcategories`.
    pub path: String,

    /// Navigation state handed over by the previous page, as JSON.
    #[arg(long, value_name = "JSON")]
    pub state: Option<String>,
}

/// One selectable entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct OptionRow {
    id: Id,
    label: String,
}

fn options<S: CatalogSource>(resolver: &FilterResolver<S>, level: Level) -> Vec<OptionRow> {
    fn rows<T>(items: &[T], f: impl Fn(&T) -> (Id, String)) -> Vec<OptionRow> {
        items
            .iter()
            .map(|item| {
                let (id, label) = f(item);
                OptionRow { id, label }
            })
            .collect()
    }

    match level {
        Level::Manufacturer => rows(&resolver.manufacturers().items, |m| (m.id, m.name.clone())),
        Level::CarModel => rows(&resolver.car_models().items, |c| (c.id, c.name.clone())),
        Level::EngineModel => rows(&resolver.engine_models().items, |e| {
            (e.id, e.display_code().to_string())
        }),
        Level::PartCategory => rows(&resolver.part_categories().items, |c| {
            (c.id, with_count(&c.name, c.illustration_count))
        }),
        Level::PartSubCategory => rows(&resolver.part_subcategories().items, |s| {
            (s.id, with_count(&s.name, s.illustration_count))
        }),
        Level::Illustration => rows(&resolver.illustrations().items, |i| (i.id, i.title.clone())),
    }
}

fn with_count(name: &str, count: Option<u64>) -> String {
    match count {
        Some(count) => format!("{name} ({count})"),
        None => name.to_string(),
    }
}

fn status_label(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Idle => "idle".to_string(),
        LoadStatus::Loaded => "loaded".to_string(),
        LoadStatus::Failed(reason) => format!("failed: {reason}"),
    }
}

pub async fn run_resolve(ctx: &AppContext, args: ResolveArgs) -> Result<()> {
    let resolver_options = ResolverOptions {
        reset_parts_on_engine_change: ctx.config.reset_parts_on_engine_change && !args.keep_parts,
    };
    let mut resolver = FilterResolver::new(ctx.client.clone(), resolver_options);
    resolver.load_roots().await;

    if let Some(OptionalId(id)) = args.manufacturer {
        resolver.select_manufacturer(id).await;
    }
    if let Some(OptionalId(id)) = args.car_model {
        resolver.select_car_model(id).await;
    }
    if let Some(OptionalId(id)) = args.engine_model {
        resolver.select_engine_model(id).await;
    }
    if let Some(OptionalId(id)) = args.part_category {
        resolver.select_part_category(id).await;
    }
    if let Some(OptionalId(id)) = args.part_subcategory {
        resolver.select_part_subcategory(id).await;
    }

    print_resolver(ctx, &resolver)
}

fn print_resolver<S: CatalogSource>(ctx: &AppContext, resolver: &FilterResolver<S>) -> Result<()> {
    let selection = resolver.selection();
    if ctx.json {
        let levels: Vec<_> = Level::ALL
            .into_iter()
            .map(|level| {
                json!({
                    "level": level,
                    "enabled": resolver.is_enabled(level),
                    "status": status_label(resolver.status(level)),
                    "options": options(resolver, level),
                })
            })
            .collect();
        return print_json(&json!({ "selection": selection, "levels": levels }));
    }

    print_selection(&selection);
    for level in Level::ALL {
        println!();
        let heading = level.to_string();
        if resolver.is_enabled(level) {
            println!("{} {}", heading.bold(), status_label(resolver.status(level)).dimmed());
        } else {
            println!("{} {}", heading.dimmed(), "(disabled)".dimmed());
            continue;
        }
        let rows: Vec<[String; 2]> = options(resolver, level)
            .into_iter()
            .map(|row| [row.id.to_string(), row.label])
            .collect();
        if rows.is_empty() {
            println!("  {}", "no options".dimmed());
        } else {
            print_table(["ID", "Label"], &rows);
        }
    }
    Ok(())
}

fn print_selection(selection: &Selection) {
    let fmt = |id: Option<Id>| id.map_or_else(|| "-".to_string(), |id| id.to_string());
    println!(
        "{} manufacturer={} car_model={} engine_model={} part_category={} part_subcategory={}",
        "selection:".bold(),
        fmt(selection.manufacturer),
        fmt(selection.car_model),
        fmt(selection.engine_model),
        fmt(selection.part_category),
        fmt(selection.part_subcategory),
    );
}

pub async fn run_route(ctx: &AppContext, args: RouteArgs) -> Result<()> {
    let route = Route::parse(&args.path)?;
    let state: NavState = match args.state.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("invalid --state JSON")?,
        None => NavState::default(),
    };

    let context = resolve_context(&ctx.client, &route, &state).await;
    let crumbs = breadcrumbs(&context, &route);
    let items = route_listing(
        &ctx.client,
        ctx.config.reset_parts_on_engine_change,
        &route,
        context.selection(),
    )
    .await?;

    if ctx.json {
        return print_json(&json!({
            "route": route.to_string(),
            "breadcrumbs": crumbs,
            "items": items,
        }));
    }

    print_breadcrumbs(&crumbs);
    println!();
    if items.is_empty() {
        println!("Nothing to show on this page.");
    } else {
        let rows: Vec<[String; 2]> = items
            .into_iter()
            .map(|row| [row.id.to_string(), row.label])
            .collect();
        print_table(["ID", "Label"], &rows);
    }
    Ok(())
}

fn print_breadcrumbs(crumbs: &[Crumb]) {
    let trail = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            if i + 1 == crumbs.len() {
                crumb.label.bold().to_string()
            } else {
                crumb.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ");
    println!("{trail}");
}

/// What a navigation page lists below its breadcrumbs.
async fn route_listing(
    client: &Client,
    reset_parts_on_engine_change: bool,
    route: &Route,
    selection: Selection,
) -> Result<Vec<OptionRow>> {
    let rows = match route {
        Route::Home => Vec::new(),
        Route::Manufacturers => client
            .manufacturers()
            .await?
            .into_iter()
            .map(|m| OptionRow {
                id: m.id,
                label: m.name,
            })
            .collect(),
        Route::ManufacturerEngines { manufacturer } => client
            .engine_models(&EngineModelQuery::by_manufacturer(*manufacturer))
            .await?
            .into_iter()
            .map(|e| OptionRow {
                id: e.id,
                label: e.display_code().to_string(),
            })
            .collect(),
        Route::EngineCars { engine } => client
            .car_models(&CarModelQuery::by_engine_model(*engine))
            .await?
            .into_iter()
            .map(|c| OptionRow {
                id: c.id,
                label: c.name,
            })
            .collect(),
        Route::CarCategories { .. } => {
            let query = PartCategoryQuery {
                car_model: selection.car_model,
                engine_model: selection.engine_model,
                list: ListOptions::default(),
            };
            client
                .part_categories(&query)
                .await?
                .into_iter()
                .map(|c| OptionRow {
                    id: c.id,
                    label: with_count(&c.name, c.illustration_count),
                })
                .collect()
        }
        Route::CategorySubcategories { .. } => {
            let mut resolver = FilterResolver::new(
                client.clone(),
                ResolverOptions {
                    reset_parts_on_engine_change,
                },
            );
            resolver.restore(selection).await;
            visible_subcategories(&resolver.part_subcategories().items)
                .into_iter()
                .map(|s| OptionRow {
                    id: s.id,
                    label: with_count(&s.name, s.illustration_count),
                })
                .collect()
        }
        Route::SubcategoryIllustrations { .. } => {
            let mut resolver = FilterResolver::new(
                client.clone(),
                ResolverOptions {
                    reset_parts_on_engine_change,
                },
            );
            resolver.restore(selection).await;
            options(&resolver, Level::Illustration)
        }
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use illustra_backend_client::ClientConfig;
    use illustra_backend_client::Session;
    use pretty_assertions::assert_eq;

    #[test]
    fn optional_id_accepts_clear_markers() {
        assert_eq!("none".parse::<OptionalId>().unwrap(), OptionalId(None));
        assert_eq!("NULL".parse::<OptionalId>().unwrap(), OptionalId(None));
        assert_eq!("".parse::<OptionalId>().unwrap(), OptionalId(None));
        assert_eq!(" 42 ".parse::<OptionalId>().unwrap(), OptionalId(Some(42)));
        assert!("toyota".parse::<OptionalId>().is_err());
    }

    #[test]
    fn labels_include_counts_when_known() {
        assert_eq!(with_count("Pistons", Some(3)), "Pistons (3)");
        assert_eq!(with_count("Pistons", None), "Pistons");
    }

    #[tokio::test]
    async fn home_route_lists_nothing() {
        let client =
            Client::new(&ClientConfig::with_base_url("http://127.0.0.1:9/api"), Session::anonymous())
                .unwrap();
        let rows = route_listing(&client, true, &Route::Home, Selection::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
