//! Schema dumping for MCP tool inspection.

use clickupmcp::ClickUpServer;

/// Dump registered tool schemas to stdout.
///
/// `filter` matches case-insensitively against any part of the tool name.
/// Returns `false` when nothing matched.
pub fn dump_schemas(filter: Option<&str>) -> Result<bool, serde_json::Error> {
    let tools = ClickUpServer::tools();

    let filtered: Vec<_> = match filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            tools
                .iter()
                .filter(|t| t.name.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => tools.iter().collect(),
    };

    if filtered.is_empty() {
        let names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
        eprintln!("No matching tools found for filter: {:?}", filter);
        eprintln!("Available tools: {}", names.join(", "));
        return Ok(false);
    }

    for tool in filtered {
        println!("=== {} ===", tool.name);
        if let Some(description) = &tool.description {
            println!("Description: {}", description);
        }
        println!();
        println!("{}", serde_json::to_string_pretty(&*tool.input_schema)?);
        println!();
    }

    Ok(true)
}
