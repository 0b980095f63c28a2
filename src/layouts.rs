//! Built-in page layout components
//!
//! A small HTML page skeleton whose parts are separate components resolved
//! through the registry, so folders searched before the layout folder can
//! replace any part (navigation, content, footer, ...) by name.
//!
//! | Component | Props | Embeds |
//! |---|---|---|
//! | `layouts/page` | `lang`, `title` (required), `contents` | `layouts/head`, `layouts/body` |
//! | `layouts/head` | `title` (required) | |
//! | `layouts/body` | `title` (required), `contents` | `layouts/navigation`, `layouts/content`, `layouts/footer` |
//! | `layouts/content` | `title` (required), `contents` | items of `contents` |
//! | `layouts/navigation` | | |
//! | `layouts/footer` | | |

use crate::prop::PropOptions;
use crate::registry::ComponentRegistry;
use crate::value::{Kind, Value};

fn title_prop() -> PropOptions {
    PropOptions::new().required().of_type(Kind::String)
}

fn contents_prop() -> PropOptions {
    PropOptions::new().of_type([Kind::Array, Kind::String, Kind::Component])
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn text_of(value: &Value) -> String {
    escape_html(&value.as_text().unwrap_or_default())
}

/// Register the page layout components in `folder`
pub fn register(registry: &mut ComponentRegistry, folder: &str) {
    registry.register(folder, "layouts/page", |ctx| {
        let lang = ctx.prop(
            "lang",
            &PropOptions::new().of_type(Kind::String).with_default("en"),
        )?;
        let title = ctx.prop("title", &title_prop())?;
        let contents = ctx.prop("contents", &contents_prop())?;

        ctx.write(format!("<!doctype html>\n<html lang=\"{}\">\n", text_of(&lang)));
        let head = ctx.create("layouts/head")?.assign("title", title.clone());
        ctx.embed(&head)?;
        let body = ctx
            .create("layouts/body")?
            .assign("title", title)
            .assign("contents", contents);
        ctx.embed(&body)?;
        ctx.write("</html>\n");
        Ok(())
    });

    registry.register(folder, "layouts/head", |ctx| {
        let title = ctx.prop("title", &title_prop())?;
        ctx.write(format!("<head><title>{}</title></head>\n", text_of(&title)));
        Ok(())
    });

    registry.register(folder, "layouts/body", |ctx| {
        let title = ctx.prop("title", &title_prop())?;
        let contents = ctx.prop("contents", &contents_prop())?;

        ctx.write("<body>\n");
        let navigation = ctx.create("layouts/navigation")?;
        ctx.embed(&navigation)?;
        let content = ctx
            .create("layouts/content")?
            .assign("title", title)
            .assign("contents", contents);
        ctx.embed(&content)?;
        let footer = ctx.create("layouts/footer")?;
        ctx.embed(&footer)?;
        ctx.write("</body>\n");
        Ok(())
    });

    registry.register(folder, "layouts/content", |ctx| {
        let title = ctx.prop("title", &title_prop())?;
        let contents = ctx.prop("contents", &contents_prop())?;

        ctx.write(format!("<main>\n<h1>{}</h1>\n", text_of(&title)));
        ctx.embed_value(&contents)?;
        ctx.write("</main>\n");
        Ok(())
    });

    registry.register_static(folder, "layouts/navigation", "");
    registry.register_static(folder, "layouts/footer", "");
}
