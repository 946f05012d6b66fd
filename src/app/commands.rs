use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::catalog::{CatalogClient, Product, ProductPayload};
use crate::config::{config_path, load_settings, save_settings, Settings};
use crate::screens::form::parse_price;
use crate::tui::views::format_price;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return crate::tui::shop::cmd_shop();
    }
    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Shop => crate::tui::shop::cmd_shop(),
        CliVerb::Products => cmd_products(&args[1..]),
        CliVerb::Config => cmd_config(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}

fn catalog_client() -> Result<CatalogClient, String> {
    let settings = load_settings().map_err(|e| e.to_string())?;
    Ok(CatalogClient::from_settings(&settings))
}

fn cmd_products(args: &[String]) -> Result<String, String> {
    let Some(subcommand) = args.first() else {
        return Err("products requires a subcommand: list, get, add, update, delete".to_string());
    };
    match subcommand.as_str() {
        "list" => cmd_products_list(),
        "get" => cmd_products_get(&args[1..]),
        "add" => cmd_products_add(&args[1..]),
        "update" => cmd_products_update(&args[1..]),
        "delete" => cmd_products_delete(&args[1..]),
        other => Err(format!("unknown products subcommand `{other}`")),
    }
}

fn cmd_products_list() -> Result<String, String> {
    let client = catalog_client()?;
    let products = client.list().map_err(|e| e.to_string())?;
    if products.is_empty() {
        return Ok("no products in the catalog".to_string());
    }
    Ok(products
        .iter()
        .map(format_product_line)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn cmd_products_get(args: &[String]) -> Result<String, String> {
    let Some(id) = args.first() else {
        return Err("products get requires an id".to_string());
    };
    let client = catalog_client()?;
    let product = client.get(id).map_err(|e| e.to_string())?;
    Ok(format_product_detail(&product))
}

fn cmd_products_add(args: &[String]) -> Result<String, String> {
    let payload = parse_payload_args(args, "products add")?;
    let client = catalog_client()?;
    let created = client.create(&payload).map_err(|e| e.to_string())?;
    Ok(format!("created product\n{}", format_product_line(&created)))
}

fn cmd_products_update(args: &[String]) -> Result<String, String> {
    let Some(id) = args.first() else {
        return Err("products update requires an id".to_string());
    };
    let payload = parse_payload_args(&args[1..], "products update")?;
    let client = catalog_client()?;
    let updated = client.update(id, &payload).map_err(|e| e.to_string())?;
    Ok(format!("updated product\n{}", format_product_line(&updated)))
}

fn cmd_products_delete(args: &[String]) -> Result<String, String> {
    let Some(id) = args.first() else {
        return Err("products delete requires an id".to_string());
    };
    let client = catalog_client()?;
    client.delete(id).map_err(|e| e.to_string())?;
    Ok(format!("deleted product {id}"))
}

/// Positional name and price followed by optional `--image` and
/// `--description` flags. Price accepts the same comma/period input the
/// form screen does.
fn parse_payload_args(args: &[String], context: &str) -> Result<ProductPayload, String> {
    let (Some(name), Some(raw_price)) = (args.first(), args.get(1)) else {
        return Err(format!("{context} requires <name> and <price>"));
    };
    if name.trim().is_empty() {
        return Err(format!("{context} name must not be empty"));
    }
    let price = parse_price(raw_price).map_err(|e| e.to_string())?;
    let mut image = String::new();
    let mut description = String::new();
    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--image" => {
                image = rest
                    .next()
                    .ok_or_else(|| "--image requires a value".to_string())?
                    .clone();
            }
            "--description" => {
                description = rest
                    .next()
                    .ok_or_else(|| "--description requires a value".to_string())?
                    .clone();
            }
            other => return Err(format!("unknown flag `{other}` for {context}")),
        }
    }
    Ok(ProductPayload {
        name: name.trim().to_string(),
        price,
        image,
        description,
    })
}

fn cmd_config(args: &[String]) -> Result<String, String> {
    let Some(subcommand) = args.first() else {
        return Err("config requires a subcommand: show, set-api-base".to_string());
    };
    match subcommand.as_str() {
        "show" => {
            let settings = load_settings().map_err(|e| e.to_string())?;
            let path = config_path().map_err(|e| e.to_string())?;
            Ok(format!(
                "api_base={}\nconfig={}",
                settings.api_base,
                path.display()
            ))
        }
        "set-api-base" => {
            let Some(api_base) = args.get(1) else {
                return Err("config set-api-base requires a url".to_string());
            };
            let settings = Settings {
                api_base: api_base.clone(),
            };
            let path = save_settings(&settings).map_err(|e| e.to_string())?;
            Ok(format!(
                "api_base={}\nconfig={}",
                settings.api_base,
                path.display()
            ))
        }
        other => Err(format!("unknown config subcommand `{other}`")),
    }
}

fn format_product_line(product: &Product) -> String {
    format!(
        "{}  {}  {}",
        product.id,
        product.name,
        format_price(product.price)
    )
}

fn format_product_detail(product: &Product) -> String {
    let mut lines = vec![
        format!("id={}", product.id),
        format!("name={}", product.name),
        format!("price={}", format_price(product.price)),
    ];
    if !product.description.is_empty() {
        lines.push(format!("description={}", product.description));
    }
    if !product.image.is_empty() {
        lines.push(format!("image={}", product.image));
    }
    lines.join("\n")
}
