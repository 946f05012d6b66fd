#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Shop,
    Products,
    Config,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "shop" => CliVerb::Shop,
        "products" => CliVerb::Products,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  shop                                 Open the storefront (default)".to_string(),
        "  products list                        Print the product catalog".to_string(),
        "  products get <id>                    Print one product".to_string(),
        "  products add <name> <price> [--image URL] [--description TEXT]".to_string(),
        "                                       Create a product".to_string(),
        "  products update <id> <name> <price> [--image URL] [--description TEXT]".to_string(),
        "                                       Replace a product".to_string(),
        "  products delete <id>                 Delete a product".to_string(),
        "  config show                          Print the active settings".to_string(),
        "  config set-api-base <url>            Point the client at another catalog API"
            .to_string(),
    ]
}

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}
