use std::io::{self, Write};

use clap::Args;
use storefront::{
    config::StorefrontConfig,
    display::MenuItemView,
    menu::{CategoryItems, Menu, MenuItem},
    storefront::Storefront,
};

use super::source::{SourceArgs, open_storefront};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Toggle a category by title before printing (repeatable)
    #[arg(long = "toggle", value_name = "TITLE")]
    toggles: Vec<String>,

    /// Toggle a subcategory of the expanded category (repeatable)
    #[arg(long = "toggle-sub", value_name = "TITLE")]
    subcategory_toggles: Vec<String>,
}

pub(crate) async fn run(args: MenuArgs) -> Result<(), String> {
    let mut storefront = open_storefront(&args.source).await?;

    for title in &args.toggles {
        storefront
            .toggle_category(title)
            .map_err(|error| error.to_string())?;
    }

    for title in &args.subcategory_toggles {
        storefront
            .toggle_subcategory(title)
            .map_err(|error| error.to_string())?;
    }

    let stdout = io::stdout();

    write_menu(stdout.lock(), &storefront).map_err(|error| format!("failed to write menu: {error}"))
}

/// Write the restaurant header and every category, expanding the open ones.
fn write_menu(mut out: impl Write, storefront: &Storefront) -> io::Result<()> {
    let Some(menu) = storefront.menu() else {
        return writeln!(out, "Loading menu...");
    };

    write_header(&mut out, menu)?;

    let accordion = storefront.accordion();

    for category in &menu.categories {
        let expanded = accordion.is_expanded(&category.title);

        writeln!(out, "{} {}", marker(expanded), category.title)?;

        if !expanded {
            continue;
        }

        match &category.items {
            CategoryItems::Flat(items) => {
                write_items(&mut out, items, storefront.config(), 1)?;
            }
            CategoryItems::Nested(subcategories) => {
                for subcategory in subcategories {
                    let open = accordion
                        .is_subcategory_expanded(&category.title, &subcategory.title);

                    writeln!(out, "  {} {}", marker(open), subcategory.heading())?;

                    if open {
                        write_items(&mut out, &subcategory.items, storefront.config(), 2)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn write_header(out: &mut impl Write, menu: &Menu) -> io::Result<()> {
    let restaurant = &menu.restaurant;

    writeln!(out, "{}", restaurant.name)?;

    if !restaurant.area_name.is_empty() {
        writeln!(out, "Outlet: {}", restaurant.area_name)?;
    }

    writeln!(out, "{}", restaurant.summary_line())?;
    writeln!(out)
}

fn write_items(
    out: &mut impl Write,
    items: &[MenuItem],
    config: &StorefrontConfig,
    depth: usize,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);

    for item in items {
        let view = MenuItemView::new(item, config);

        let price = view.price.as_deref().unwrap_or("-");
        let add = if view.can_add { "" } else { " (unavailable)" };

        writeln!(out, "{indent}[{}] {}  {price}{add}", item.id, view.name)?;

        if let Some(description) = &view.description {
            writeln!(out, "{indent}    {description}")?;
        }
    }

    Ok(())
}

fn marker(expanded: bool) -> &'static str {
    if expanded { "▼" } else { "▶" }
}

#[cfg(test)]
mod tests {
    use storefront::fixtures::Fixture;
    use testresult::TestResult;

    use super::*;

    fn storefront(fixture: &str) -> TestResult<Storefront> {
        let mut storefront = Storefront::new(StorefrontConfig::default());
        storefront.receive_payload(&Fixture::new().payload(fixture)?);

        Ok(storefront)
    }

    fn render(storefront: &Storefront) -> TestResult<String> {
        let mut out = Vec::new();
        write_menu(&mut out, storefront)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn loading_storefront_writes_placeholder() -> TestResult {
        let text = render(&Storefront::new(StorefrontConfig::default()))?;

        assert_eq!(text, "Loading menu...\n");

        Ok(())
    }

    #[test]
    fn first_category_is_listed_expanded() -> TestResult {
        let text = render(&storefront("flat-three")?)?;

        assert!(text.starts_with("Pizza Hut\n"), "unexpected header in {text}");
        assert!(text.contains("▼ Recommended"), "category not expanded in {text}");
        assert!(text.contains("[101]"), "missing item in {text}");

        Ok(())
    }

    #[test]
    fn collapsed_category_hides_items() -> TestResult {
        let mut storefront = storefront("flat-three")?;
        storefront.toggle_category("Recommended")?;

        let text = render(&storefront)?;

        assert!(text.contains("▶ Recommended"), "category still expanded in {text}");
        assert!(!text.contains("[101]"), "items shown for collapsed category in {text}");

        Ok(())
    }

    #[test]
    fn one_subcategory_is_expanded_at_a_time() -> TestResult {
        let mut storefront = storefront("nested-two")?;

        let text = render(&storefront)?;

        assert!(text.contains("▼ Hot (2)"), "first subcategory not expanded in {text}");
        assert!(text.contains("▶ Cold (3)"), "missing subcategory heading in {text}");
        assert!(text.contains("[201]"), "missing subcategory item in {text}");
        assert!(!text.contains("[211]"), "collapsed subcategory items shown in {text}");

        storefront.toggle_subcategory("Cold")?;

        let text = render(&storefront)?;

        assert!(text.contains("▶ Hot (2)"), "previous subcategory still open in {text}");
        assert!(text.contains("[211]"), "missing subcategory item in {text}");
        assert!(!text.contains("[201]"), "previous subcategory items shown in {text}");

        Ok(())
    }
}
