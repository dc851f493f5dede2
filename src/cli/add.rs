//! The `add` command: record a new shopping list

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::output::Output;
use crate::domain::Item;
use crate::store::HistoryStore;

/// Records a new shopping list from positional `name[@category]` arguments
/// and/or a JSON item file.
pub fn add(
    output: &Output,
    store: &mut HistoryStore,
    item_args: &[String],
    notes: Option<String>,
    from_json: Option<&Path>,
) -> Result<()> {
    let mut items: Vec<Item> = item_args.iter().map(|arg| parse_item(arg)).collect();

    if let Some(path) = from_json {
        let mut file_items = read_items_file(path)?;
        output.verbose_ctx(
            "add",
            &format!("Read {} items from {}", file_items.len(), path.display()),
        );
        items.append(&mut file_items);
    }

    if items.is_empty() {
        bail!("No items given. Pass items as arguments or use --from-json.");
    }

    output.verbose_ctx("add", &format!("Saving to {}", store.path().display()));
    let record = store.append(items, notes)?;

    if output.is_json() {
        output.data(record);
    } else {
        output.success(&format!(
            "Recorded list {} ({} items)",
            record.id, record.total_items
        ));
    }

    Ok(())
}

/// Parses `name` or `name@category`. The split is on the last `@`, so
/// product names containing `@` still work as long as a category follows.
fn parse_item(arg: &str) -> Item {
    match arg.rsplit_once('@') {
        Some((name, category)) if !name.is_empty() && !category.is_empty() => {
            Item::with_category(name.trim(), category.trim())
        }
        _ => Item::new(arg.trim()),
    }
}

fn read_items_file(path: &Path) -> Result<Vec<Item>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read item file: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Item file is not a JSON array of items: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_item() {
        let item = parse_item("Milk");
        assert_eq!(item.name, "Milk");
        assert!(item.category.is_none());
    }

    #[test]
    fn parse_item_with_category() {
        let item = parse_item("Kipfilet@meat");
        assert_eq!(item.name, "Kipfilet");
        assert_eq!(item.category.as_deref(), Some("meat"));
    }

    #[test]
    fn split_uses_last_at_sign() {
        let item = parse_item("melk@1.5%@essentials");
        assert_eq!(item.name, "melk@1.5%");
        assert_eq!(item.category.as_deref(), Some("essentials"));
    }

    #[test]
    fn trailing_at_sign_is_not_a_category() {
        let item = parse_item("Milk@");
        assert_eq!(item.name, "Milk@");
        assert!(item.category.is_none());
    }

    #[test]
    fn item_file_parses_classifier_shape() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::write(
            &path,
            r#"[
                {"name": "Kipfilet", "category": "meat", "price": "4.99"},
                {"name": "AH Halfvolle melk"}
            ]"#,
        )
        .unwrap();

        let items = read_items_file(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category.as_deref(), Some("meat"));
        assert_eq!(items[0].extra.get("price"), Some(&serde_json::json!("4.99")));
        assert!(items[1].category.is_none());
    }
}
