//! Command-line client.
//!
//! Each invocation behaves like one load of the checkout page: it reads the address
//! book, restores the remembered selection, builds a renderer per address and runs one
//! command against them.

mod args;
mod print;
mod terminal;

pub use args::{Cli, Commands};

use directories::ProjectDirs;
use futures::executor::block_on;
use print::{format_time_ago, print_cards, print_messages, summarize};
use shipaddr::attributes::OptionTable;
use shipaddr::commands::CmdMessage;
use shipaddr::config::{CheckoutConfig, CONFIG_KEYS};
use shipaddr::context::CheckoutContext;
use shipaddr::country::CountryDirectory;
use shipaddr::error::{AddressError, Result};
use shipaddr::gateway::fs::FileGateway;
use shipaddr::model::Address;
use shipaddr::renderer::AddressRenderer;
use shipaddr::session::FileSessionCache;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use terminal::{TerminalPage, TerminalPrompter};

const DATA_DIR_ENV: &str = "SHIPADDR_DATA";

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;

    match cli.command {
        Some(Commands::Add { set, street }) => handle_add(&data_dir, set, street),
        Some(Commands::List) | None => handle_list(&CheckoutPage::load(&data_dir, false)?),
        Some(Commands::Select { index }) => {
            handle_select(&CheckoutPage::load(&data_dir, false)?, &index)
        }
        Some(Commands::Edit {
            index,
            set,
            street,
            clear_street,
        }) => handle_edit(
            &CheckoutPage::load(&data_dir, false)?,
            &index,
            set,
            street,
            clear_street,
        ),
        Some(Commands::Delete { index, yes }) => {
            handle_delete(&CheckoutPage::load(&data_dir, yes)?, &index)
        }
        Some(Commands::Status) => handle_status(&CheckoutPage::load(&data_dir, false)?),
        Some(Commands::Config { key, value }) => handle_config(&data_dir, key, value),
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "shipaddr", "shipaddr")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AddressError::Store("Could not determine data directory".to_string()))
}

/// The rendered checkout step for one invocation.
struct CheckoutPage {
    ctx: Rc<CheckoutContext<FileGateway>>,
    renderers: Vec<AddressRenderer<FileGateway>>,
    session: Rc<FileSessionCache>,
}

impl CheckoutPage {
    fn load(data_dir: &Path, assume_yes: bool) -> Result<Self> {
        let gateway = FileGateway::new(data_dir);
        let addresses = gateway.list()?;
        let session = Rc::new(FileSessionCache::new(data_dir));

        let ctx = CheckoutContext::new(
            gateway,
            session.clone(),
            Rc::new(TerminalPage),
            Rc::new(TerminalPrompter::new(assume_yes)),
        )
        .with_addresses(addresses.clone())
        .with_config(CheckoutConfig::load(data_dir)?)
        .with_countries(CountryDirectory::load(data_dir)?)
        .with_options(OptionTable::load(data_dir)?)
        .into_shared();

        ctx.restore_selection()?;

        let renderers = addresses
            .into_iter()
            .map(|address| AddressRenderer::new(Rc::clone(&ctx), address))
            .collect();

        Ok(Self {
            ctx,
            renderers,
            session,
        })
    }

    fn renderer(&self, index: &str) -> Result<&AddressRenderer<FileGateway>> {
        let n: usize = index
            .parse()
            .map_err(|_| AddressError::InvalidInput(format!("Invalid index: {}", index)))?;
        n.checked_sub(1)
            .and_then(|i| self.renderers.get(i))
            .ok_or_else(|| AddressError::InvalidInput(format!("No address at index {}", index)))
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(AddressError::InvalidInput(format!(
            "Expected FIELD=VALUE, got: {}",
            raw
        ))),
    }
}

fn handle_add(data_dir: &Path, set: Vec<String>, street: Vec<String>) -> Result<()> {
    let mut address = Address::unsaved();
    for raw in &set {
        let (name, value) = parse_assignment(raw)?;
        if !address.set_field(&name, value) {
            return Err(AddressError::InvalidInput(format!(
                "Unknown address field: {}",
                name
            )));
        }
    }
    address.street = street;

    let gateway = FileGateway::new(data_dir);
    let stored = gateway.insert(address)?;
    let index = gateway.list()?.len();

    let label = if stored.full_name().is_empty() {
        stored.key.to_string()
    } else {
        stored.full_name()
    };
    print_messages(&[CmdMessage::success(format!(
        "Address added ({}): {}",
        index, label
    ))]);
    Ok(())
}

fn handle_list(page: &CheckoutPage) -> Result<()> {
    let cards: Vec<_> = page.renderers.iter().map(|r| r.card()).collect();
    print_cards(&cards);
    Ok(())
}

fn handle_select(page: &CheckoutPage, index: &str) -> Result<()> {
    let result = page.renderer(index)?.select();
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    page: &CheckoutPage,
    index: &str,
    set: Vec<String>,
    street: Vec<String>,
    clear_street: bool,
) -> Result<()> {
    let renderer = page.renderer(index)?;
    let opened = renderer.edit();
    print_messages(&opened.messages);

    {
        let mut form = page.ctx.form.borrow_mut();
        if clear_street {
            form.clear_street_lines();
        }
        for (i, line) in street.iter().enumerate() {
            form.set_street_line(i, line);
        }
        for raw in &set {
            let (name, value) = parse_assignment(raw)?;
            if !form.set_value(&name, value) {
                return Err(AddressError::InvalidInput(format!(
                    "Unknown form field: {}",
                    name
                )));
            }
        }
    }

    let result = block_on(renderer.submit_form());
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(page: &CheckoutPage, index: &str) -> Result<()> {
    let renderer = page.renderer(index)?;
    let id = renderer
        .address()
        .customer_address_id
        .clone()
        .ok_or_else(|| AddressError::InvalidInput(format!("Address {} is not stored", index)))?;

    let result = block_on(renderer.delete(&id));
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(page: &CheckoutPage) -> Result<()> {
    let Some(renderer) = page.renderers.iter().find(|r| r.is_selected()) else {
        println!("No shipping address selected.");
        return Ok(());
    };

    println!("{}", summarize(&renderer.card()));
    if let Some(selected) = page.session.load()? {
        println!("Selected {}", format_time_ago(selected.selected_at));
    }
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = CheckoutConfig::load(data_dir)?;

    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{} = {}", key, value),
            None => {
                return Err(AddressError::InvalidInput(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        },
        (Some(key), Some(value)) => {
            config.set(&key, value)?;
            config.save(data_dir)?;
            print_messages(&[CmdMessage::success(format!("Config updated: {}", key))]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_assignments() {
        assert_eq!(
            parse_assignment("city=New York").unwrap(),
            ("city".to_string(), "New York".to_string())
        );
        assert_eq!(
            parse_assignment("company=").unwrap(),
            ("company".to_string(), String::new())
        );
        assert!(parse_assignment("city").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn data_dir_flag_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/x"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/x"));
    }
}
