//! Tip → Telegram Markdown message. Transport glue, not state machine.

use tipcast_core::types::Tip;

/// Render a tip as the daily broadcast message.
pub fn format_tip(tip: &Tip) -> String {
    let category = tip.category.as_deref().unwrap_or("linux");
    let hashtag = format!("#{}", category.replace('_', ""));
    format!(
        "🚀 **Daily Linux Tip** {hashtag}\n\n\
         **{title}**\n\n\
         📝 *Description:*\n{description}\n\n\
         💻 *Command:*\n\
         ```bash\n{command}\n```\n\
         🆔 ID: {id}",
        title = tip.title,
        description = tip.description,
        command = tip.command,
        id = tip.id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(category: Option<&str>) -> Tip {
        Tip {
            id: "tip-007".to_string(),
            title: "Find big files".to_string(),
            description: "Largest files under the current directory.".to_string(),
            command: "du -ah . | sort -rh | head".to_string(),
            category: category.map(str::to_string),
            is_published: false,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn includes_all_fields_and_fenced_command() {
        let msg = format_tip(&tip(Some("disk_usage")));
        assert!(msg.contains("#diskusage"));
        assert!(msg.contains("**Find big files**"));
        assert!(msg.contains("```bash\ndu -ah . | sort -rh | head\n```"));
        assert!(msg.contains("ID: tip-007"));
    }

    #[test]
    fn missing_category_falls_back_to_linux() {
        assert!(format_tip(&tip(None)).contains("#linux"));
    }
}
