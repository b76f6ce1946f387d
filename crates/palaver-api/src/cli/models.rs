//! `palaver models` - print the model catalog.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use palaver_infra::secret::ProviderCredentials;
use palaver_types::model::{AVAILABLE_MODELS, DEFAULT_MODEL_ID};

pub fn list_models(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(AVAILABLE_MODELS)?);
        return Ok(());
    }

    let credentials = ProviderCredentials::from_env();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Provider").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Description").fg(Color::White),
    ]);

    for model in AVAILABLE_MODELS {
        let id = if model.id == DEFAULT_MODEL_ID {
            format!("{} (default)", model.id)
        } else {
            model.id.to_string()
        };

        let key_cell = if credentials.get(model.provider).is_some() {
            Cell::new("● set").fg(Color::Green)
        } else {
            Cell::new(format!("○ {}", model.provider.api_key_env_var())).fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(id),
            Cell::new(model.name),
            Cell::new(model.provider.to_string()),
            key_cell,
            Cell::new(model.description.unwrap_or("")),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {} models; routing is by prefix (gpt-, o1- → OpenAI, deepseek- → DeepSeek)",
        style(AVAILABLE_MODELS.len()).bold()
    );
    println!();
    Ok(())
}
