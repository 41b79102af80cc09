//! Chat command handler.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};

use chainfind_core::config::Config;
use chainfind_core::providers::ConversationChannel;
use chainfind_core::providers::gemini::{GeminiChannel, GeminiConfig};
use chainfind_core::session::TerminalSession;

use crate::chat;

pub async fn run(
    config: &Config,
    model_override: Option<&str>,
    max_output_tokens_override: Option<u32>,
) -> Result<()> {
    let model = model_override
        .map(str::to_string)
        .unwrap_or_else(|| config.gemini.model.clone());
    let max_output_tokens =
        max_output_tokens_override.unwrap_or(config.gemini.max_output_tokens);
    let base_url = config.gemini.effective_base_url().map(str::to_string);
    let system_instruction = config.effective_system_prompt();

    // The channel is built lazily so local commands work without a key.
    let connect = Box::new(move || {
        let gemini = GeminiConfig::from_env(
            model.clone(),
            max_output_tokens,
            base_url.as_deref(),
            system_instruction.clone(),
        )?;
        Ok(Box::new(GeminiChannel::new(gemini)) as Box<dyn ConversationChannel>)
    });
    let session = TerminalSession::new(connect);

    let mut stdout = std::io::stdout().lock();

    // If stdin is piped, send a single turn and exit.
    if !std::io::stdin().is_terminal() {
        let mut prompt = String::new();
        std::io::stdin().lock().read_to_string(&mut prompt)?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            anyhow::bail!("No input provided via pipe");
        }
        return chat::run_single_turn(prompt, &mut stdout, session).await;
    }

    let stdin = std::io::stdin().lock();
    chat::run_chat(stdin, &mut stdout, session)
        .await
        .context("interactive session failed")
}
