use anyhow::Result;
use illustra_backend_client::models::CarModel;
use illustra_backend_client::models::Choice;
use illustra_backend_client::models::EngineModel;
use illustra_backend_client::models::Id;
use illustra_backend_client::models::Manufacturer;
use illustra_backend_client::models::Page;
use illustra_backend_client::models::PartCategory;
use illustra_backend_client::models::PartSubCategory;
use illustra_backend_client::query::CarModelQuery;
use illustra_backend_client::query::EngineModelQuery;
use illustra_backend_client::query::ListOptions;
use illustra_backend_client::query::PartCategoryQuery;
use illustra_backend_client::query::PartSubCategoryQuery;
use illustra_navigator::navigation::visible_subcategories;
use owo_colors::OwoColorize;

use crate::AppContext;
use crate::output::or_dash;
use crate::output::print_json;
use crate::output::print_table;

#[derive(Debug, clap::Parser)]
pub struct BrowseCli {
    #[command(subcommand)]
    pub subcommand: BrowseSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum BrowseSubcommand {
    /// List manufacturers.
    Manufacturers(ListArgs),

    /// Show one manufacturer by id or slug.
    Manufacturer { key: String },

    /// List engine models.
    Engines(EnginesArgs),

    /// Show one engine model.
    Engine { id: Id },

    /// List car models.
    Cars(CarsArgs),

    /// Show one car model by slug or id.
    Car { key: String },

    /// List part categories, optionally counted within a vehicle scope.
    Categories(CategoriesArgs),

    /// List part subcategories.
    Subcategories(SubcategoriesArgs),

    /// List the fuel type choices for engine models.
    FuelTypes,

    /// List the vehicle type choices for car models.
    VehicleTypes,
}

#[derive(Debug, Default, clap::Args)]
pub struct ListArgs {
    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,

    /// Backend ordering expression, e.g. `name` or `-created_at`.
    #[arg(long)]
    pub ordering: Option<String>,

    #[arg(long)]
    pub page: Option<u32>,

    /// Page size.
    #[arg(long)]
    pub limit: Option<u32>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        ListOptions {
            search: args.search,
            ordering: args.ordering,
            page: args.page,
            limit: args.limit,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct EnginesArgs {
    #[arg(long)]
    pub manufacturer: Option<Id>,

    #[arg(long)]
    pub car_model: Option<Id>,

    #[arg(long)]
    pub fuel_type: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, clap::Args)]
pub struct CarsArgs {
    #[arg(long)]
    pub manufacturer: Option<Id>,

    #[arg(long)]
    pub engine_model: Option<Id>,

    #[arg(long)]
    pub vehicle_type: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, clap::Args)]
pub struct CategoriesArgs {
    #[arg(long)]
    pub engine_model: Option<Id>,

    #[arg(long)]
    pub car_model: Option<Id>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Debug, clap::Args)]
pub struct SubcategoriesArgs {
    #[arg(long)]
    pub category: Option<Id>,

    #[arg(long)]
    pub engine_model: Option<Id>,

    #[arg(long)]
    pub car_model: Option<Id>,

    /// Include subcategories without illustrations.
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub list: ListArgs,
}

impl BrowseCli {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let client = &ctx.client;
        match self.subcommand {
            BrowseSubcommand::Manufacturers(args) => {
                let page = client.list_manufacturers(&args.into()).await?;
                print_manufacturers(ctx, &page)
            }
            BrowseSubcommand::Manufacturer { key } => {
                let manufacturer = match key.parse::<Id>() {
                    Ok(id) => client.get_manufacturer(id).await?,
                    Err(_) => client.get_manufacturer_by_slug(&key).await?,
                };
                print_manufacturers(ctx, &Page::Plain(vec![manufacturer]))
            }
            BrowseSubcommand::Engines(args) => {
                let query = EngineModelQuery {
                    manufacturer: args.manufacturer,
                    car_model: args.car_model,
                    fuel_type: args.fuel_type,
                    list: args.list.into(),
                };
                let page = client.list_engine_models(&query).await?;
                print_engines(ctx, &page)
            }
            BrowseSubcommand::Engine { id } => {
                let engine = client.get_engine_model(id).await?;
                print_engines(ctx, &Page::Plain(vec![engine]))
            }
            BrowseSubcommand::Cars(args) => {
                let query = CarModelQuery {
                    manufacturer: args.manufacturer,
                    engine_model: args.engine_model,
                    vehicle_type: args.vehicle_type,
                    list: args.list.into(),
                };
                let page = client.list_car_models(&query).await?;
                print_cars(ctx, &page)
            }
            BrowseSubcommand::Car { key } => {
                let car = client.get_car_model(&key).await?;
                print_cars(ctx, &Page::Plain(vec![car]))
            }
            BrowseSubcommand::Categories(args) => {
                let query = PartCategoryQuery {
                    engine_model: args.engine_model,
                    car_model: args.car_model,
                    list: args.list.into(),
                };
                let page = client.list_part_categories(&query).await?;
                print_categories(ctx, &page)
            }
            BrowseSubcommand::Subcategories(args) => {
                let query = PartSubCategoryQuery {
                    part_category: args.category,
                    engine_model: args.engine_model,
                    car_model: args.car_model,
                    list: args.list.into(),
                };
                let page = client.list_part_subcategories(&query).await?;
                let shown: Vec<PartSubCategory> = if args.all {
                    page.into_items()
                } else {
                    visible_subcategories(page.items())
                        .into_iter()
                        .cloned()
                        .collect()
                };
                print_subcategories(ctx, &shown)
            }
            BrowseSubcommand::FuelTypes => {
                let choices = client.fuel_types().await;
                print_choices(ctx, &choices)
            }
            BrowseSubcommand::VehicleTypes => {
                let choices = client.vehicle_types().await?;
                print_choices(ctx, &choices)
            }
        }
    }
}

fn print_footer<T>(page: &Page<T>) {
    if page.has_next() {
        println!(
            "{}",
            format!("showing {} of {}; use --page for more", page.items().len(), page.total())
                .dimmed()
        );
    }
}

fn print_manufacturers(ctx: &AppContext, page: &Page<Manufacturer>) -> Result<()> {
    if ctx.json {
        return print_json(page.items());
    }
    if page.items().is_empty() {
        println!("No manufacturers found.");
        return Ok(());
    }
    let rows: Vec<[String; 5]> = page
        .items()
        .iter()
        .map(|m| {
            [
                m.id.to_string(),
                m.name.clone(),
                or_dash(Some(&m.slug)),
                or_dash(m.engine_count),
                or_dash(m.car_model_count),
            ]
        })
        .collect();
    print_table(["ID", "Name", "Slug", "Engines", "Cars"], &rows);
    print_footer(page);
    Ok(())
}

fn print_engines(ctx: &AppContext, page: &Page<EngineModel>) -> Result<()> {
    if ctx.json {
        return print_json(page.items());
    }
    if page.items().is_empty() {
        println!("No engine models found.");
        return Ok(());
    }
    let rows: Vec<[String; 5]> = page
        .items()
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.display_code().to_string(),
                e.name.clone(),
                or_dash(e.fuel_type_display.as_ref().or(Some(&e.fuel_type))),
                or_dash(e.manufacturer_name.as_ref()),
            ]
        })
        .collect();
    print_table(["ID", "Code", "Name", "Fuel", "Manufacturer"], &rows);
    print_footer(page);
    Ok(())
}

fn year_span(car: &CarModel) -> String {
    match (car.year_from, car.year_to) {
        (Some(from), Some(to)) => format!("{from}-{to}"),
        (Some(from), None) => format!("{from}-"),
        (None, Some(to)) => format!("-{to}"),
        (None, None) => "-".to_string(),
    }
}

fn print_cars(ctx: &AppContext, page: &Page<CarModel>) -> Result<()> {
    if ctx.json {
        return print_json(page.items());
    }
    if page.items().is_empty() {
        println!("No car models found.");
        return Ok(());
    }
    let rows: Vec<[String; 6]> = page
        .items()
        .iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name.clone(),
                or_dash(Some(&c.slug)),
                or_dash(c.vehicle_type_display.as_ref().or(Some(&c.vehicle_type))),
                year_span(c),
                or_dash(c.manufacturer_name.as_ref()),
            ]
        })
        .collect();
    print_table(["ID", "Name", "Slug", "Type", "Years", "Manufacturer"], &rows);
    print_footer(page);
    Ok(())
}

fn print_categories(ctx: &AppContext, page: &Page<PartCategory>) -> Result<()> {
    if ctx.json {
        return print_json(page.items());
    }
    if page.items().is_empty() {
        println!("No part categories found.");
        return Ok(());
    }
    let rows: Vec<[String; 4]> = page
        .items()
        .iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name.clone(),
                or_dash(c.subcategory_count),
                or_dash(c.illustration_count),
            ]
        })
        .collect();
    print_table(["ID", "Name", "Subcategories", "Illustrations"], &rows);
    print_footer(page);
    Ok(())
}

fn print_subcategories(ctx: &AppContext, subcategories: &[PartSubCategory]) -> Result<()> {
    if ctx.json {
        return print_json(subcategories);
    }
    if subcategories.is_empty() {
        println!("No part subcategories found.");
        return Ok(());
    }
    let rows: Vec<[String; 4]> = subcategories
        .iter()
        .map(|s| {
            [
                s.id.to_string(),
                s.name.clone(),
                or_dash(s.part_category_name.as_ref()),
                or_dash(s.illustration_count),
            ]
        })
        .collect();
    print_table(["ID", "Name", "Category", "Illustrations"], &rows);
    Ok(())
}

fn print_choices(ctx: &AppContext, choices: &[Choice]) -> Result<()> {
    if ctx.json {
        return print_json(choices);
    }
    let rows: Vec<[String; 2]> = choices
        .iter()
        .map(|choice| [choice.value.clone(), choice.label.clone()])
        .collect();
    print_table(["Value", "Label"], &rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn year_span_handles_open_ranges() {
        let car = CarModel {
            year_from: Some(2004),
            ..Default::default()
        };
        assert_eq!(year_span(&car), "2004-");
        assert_eq!(year_span(&CarModel::default()), "-");
    }
}
