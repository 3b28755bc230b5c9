mod airdrop;
mod distribution;
mod recipients;
mod wallet;

use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    config::Config, onchain::client::XrplClient, session::Session,
    xaman_api::{api::XamanApi, signer::XamanSigner},
};

use airdrop::{execute_airdrop, export_results};
use distribution::{configure_token, show_preview};
use recipients::{add_recipient, clear_recipients, load_file, paste_addresses, remove_recipient};
use wallet::{connect_wallet, disconnect_wallet};

const LOGO: &str = r#"
 __  __ ____  ____  _         _    _         _
 \ \/ /|  _ \|  _ \| |       / \  (_)_ __ __| |_ __ ___  _ __
  \  / | |_) | |_) | |      / _ \ | | '__/ _` | '__/ _ \| '_ \
  /  \ |  _ <|  __/| |___  / ___ \| | | | (_| | | | (_) | |_) |
 /_/\_\|_| \_\_|   |_____|/_/   \_\_|_|  \__,_|_|  \___/| .__/
                                                        |_|
"#;

pub async fn menu() -> eyre::Result<()> {
    let config = Config::read_default().await?;

    let ledger = XrplClient::new(config.rpc_url());
    let api = XamanApi::new(
        &config.xaman_api_url,
        &config.xaman_api_key,
        &config.xaman_api_secret,
    )?;
    let mut signer = XamanSigner::new(api, ledger.clone(), config.network, config.payload_settings());
    let mut session = Session::new(config.max_recipients);
    let settings = config.executor_settings();

    println!("{LOGO}");
    tracing::info!("Network: {} | Node: {}", config.network, config.rpc_url());

    loop {
        let options = vec![
            "Connect wallet (Xaman)",
            "Load recipients from file",
            "Paste recipient addresses",
            "Add recipient",
            "Remove recipient",
            "Clear recipients",
            "Configure token and distribution",
            "Preview distribution",
            "Execute airdrop",
            "Export results",
            "Start a new airdrop",
            "Disconnect wallet",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choice:")
            .items(&options)
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => connect_wallet(&mut session, &mut signer).await,
            1 => load_file(&mut session).await,
            2 => paste_addresses(&mut session),
            3 => add_recipient(&mut session, &ledger).await,
            4 => remove_recipient(&mut session),
            5 => clear_recipients(&mut session),
            6 => configure_token(&mut session, &settings),
            7 => {
                show_preview(&session, &settings);
                Ok(())
            }
            8 => execute_airdrop(&mut session, &signer, &ledger, &config).await,
            9 => export_results(&session, &config).await,
            10 => {
                session.reset();
                tracing::info!("Session reset");
                Ok(())
            }
            11 => {
                disconnect_wallet(&mut session, &mut signer).await;
                Ok(())
            }
            12 => return Ok(()),
            _ => {
                tracing::error!("Invalid selection");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            tracing::error!("{e}");
        }
    }
}
