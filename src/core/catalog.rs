//! Checklist template lookup.
//!
//! A catalog is a markdown file where each template is a `## <name>` heading
//! followed by a fenced `json` block of the form `{"items": [...]}`.

use crate::config::DEFAULT_TEMPLATE;
use crate::domain::model::ChecklistItem;
use regex::RegexBuilder;
use serde_json::Value;
use std::path::Path;

/// Built-in checklist used whenever the catalog cannot supply one.
pub fn default_items() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("功能完整性测试", "验证所有声明功能是否正常工作"),
        ChecklistItem::new("性能测试", "测试系统响应时间、吞吐量"),
        ChecklistItem::new("兼容性测试", "验证与主流环境的兼容性"),
        ChecklistItem::new("稳定性测试", "进行长时间运行测试"),
        ChecklistItem::new("用户界面测试", "检查UI布局、交互逻辑"),
        ChecklistItem::new("数据准确性测试", "验证输入输出数据的一致性"),
    ]
}

/// Resolves `template_name` against the catalog file at `catalog_path`.
///
/// Never fails: a missing or unreadable catalog, a missing section and a
/// malformed section all fall back, first to the `default` section and then
/// to [`default_items`].
pub fn resolve(template_name: &str, catalog_path: &Path) -> Vec<ChecklistItem> {
    if !catalog_path.exists() {
        tracing::warn!(
            "Template catalog {} not found, using built-in checklist",
            catalog_path.display()
        );
        return default_items();
    }

    let content = match std::fs::read_to_string(catalog_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                "Failed to read template catalog {}: {}, using built-in checklist",
                catalog_path.display(),
                e
            );
            return default_items();
        }
    };

    resolve_from_str(template_name, &content)
}

/// Same fallback chain as [`resolve`], over catalog text already in memory.
pub fn resolve_from_str(template_name: &str, content: &str) -> Vec<ChecklistItem> {
    if let Some(items) = extract_template(content, template_name) {
        tracing::debug!("Template '{}' resolved to {} items", template_name, items.len());
        return items;
    }

    if !template_name.eq_ignore_ascii_case(DEFAULT_TEMPLATE) {
        tracing::warn!(
            "Template '{}' not found or invalid, trying '{}'",
            template_name,
            DEFAULT_TEMPLATE
        );
        if let Some(items) = extract_template(content, DEFAULT_TEMPLATE) {
            return items;
        }
    }

    tracing::warn!("No usable template in catalog, using built-in checklist");
    default_items()
}

/// Items of the first section whose heading starts with `name`.
///
/// Returns `None` when the section is missing, its block is not valid JSON,
/// or it yields no valid item.
pub fn extract_template(content: &str, name: &str) -> Option<Vec<ChecklistItem>> {
    let block = find_json_block(content, name)?;

    let data: Value = match serde_json::from_str(block) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Template '{}' has malformed JSON: {}", name, e);
            return None;
        }
    };

    let items: Vec<ChecklistItem> = data
        .get("items")?
        .as_array()?
        .iter()
        .filter_map(normalize_item)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn find_json_block<'a>(content: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!(
        r"^##\s*{}[^\n]*\n\s*```json\s*(.*?)\s*```",
        regex::escape(name)
    );
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()
        .ok()?;

    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn normalize_item(raw: &Value) -> Option<ChecklistItem> {
    let function = raw.get("function")?.as_str()?.trim();
    let points = raw.get("points")?.as_str()?.trim();

    if function.is_empty() || points.is_empty() {
        return None;
    }
    Some(ChecklistItem::new(function, points))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"# 测试模板

## default

```json
{"items": [
  {"function": "默认功能", "points": "默认要点"}
]}
```

## api 接口测试模板

```json
{
  "items": [
    {"function": "  接口可用性 ", "points": " 检查所有接口返回 200 "},
    {"function": "", "points": "没有功能名"},
    {"function": "鉴权", "points": "   "},
    {"function": 42, "points": "数字功能名"},
    "not an object",
    {"function": "限流", "points": "超出配额返回 429"}
  ]
}
```

## broken

```json
{"items": [ {"function": "a", "points": "b"}
```

## empty

```json
{"items": []}
```
"#;

    #[test]
    fn test_default_items_are_fixed() {
        let items = default_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].function, "功能完整性测试");
        assert_eq!(items[5].function, "数据准确性测试");
    }

    #[test]
    fn test_extract_keeps_order_and_trims() {
        let items = extract_template(CATALOG, "api").unwrap();
        assert_eq!(
            items,
            vec![
                ChecklistItem::new("接口可用性", "检查所有接口返回 200"),
                ChecklistItem::new("限流", "超出配额返回 429"),
            ]
        );
    }

    #[test]
    fn test_heading_match_is_case_insensitive() {
        let items = extract_template(CATALOG, "API").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_missing_section_falls_back_to_default_section() {
        let items = resolve_from_str("performance", CATALOG);
        assert_eq!(items, vec![ChecklistItem::new("默认功能", "默认要点")]);
    }

    #[test]
    fn test_malformed_section_falls_back_to_default_section() {
        let items = resolve_from_str("broken", CATALOG);
        assert_eq!(items, vec![ChecklistItem::new("默认功能", "默认要点")]);
    }

    #[test]
    fn test_empty_section_falls_back_to_default_section() {
        let items = resolve_from_str("empty", CATALOG);
        assert_eq!(items, vec![ChecklistItem::new("默认功能", "默认要点")]);
    }

    #[test]
    fn test_no_usable_section_uses_builtin_list() {
        let catalog = "## default\n\n```json\nnot json\n```\n";
        assert_eq!(resolve_from_str("missing", catalog), default_items());
        assert_eq!(resolve_from_str("default", catalog), default_items());
        assert_eq!(resolve_from_str("DEFAULT", ""), default_items());
    }

    #[test]
    fn test_items_must_be_an_array() {
        let catalog = "## odd\n\n```json\n{\"items\": {\"function\": \"a\"}}\n```\n";
        assert!(extract_template(catalog, "odd").is_none());

        let catalog = "## list\n\n```json\n[1, 2, 3]\n```\n";
        assert!(extract_template(catalog, "list").is_none());
    }

    #[test]
    fn test_first_matching_section_wins() {
        let catalog = "## dup\n\n```json\n{\"items\": [{\"function\": \"first\", \"points\": \"p\"}]}\n```\n\n\
                       ## dup\n\n```json\n{\"items\": [{\"function\": \"second\", \"points\": \"p\"}]}\n```\n";
        let items = extract_template(catalog, "dup").unwrap();
        assert_eq!(items[0].function, "first");
    }

    #[test]
    fn test_template_name_is_not_a_regex() {
        assert!(extract_template(CATALOG, "a.i").is_none());
    }

    #[test]
    fn test_missing_catalog_file_uses_builtin_list() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let items = resolve("default", &temp_dir.path().join("templates.md"));
        assert_eq!(items, default_items());
    }

    #[test]
    fn test_resolve_reads_catalog_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("templates.md");
        std::fs::write(&path, CATALOG).unwrap();

        let items = resolve("api", &path);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].function, "限流");
    }
}
