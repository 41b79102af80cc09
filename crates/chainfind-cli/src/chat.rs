//! Interactive CHAIN_CORE terminal loop.
//!
//! REPL-style session over any `BufRead`/`Write` pair. Replies stream
//! chunk-by-chunk; `/signal` collects the contact form fields from the
//! input; `:q` or EOF exits.

use std::io::{BufRead, Write};

use anyhow::Result;

use chainfind_core::commands::LocalCommand;
use chainfind_core::contact::SignalForm;
use chainfind_core::session::{Submission, TerminalSession};
use chainfind_core::transcript::Transcript;

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "> ";
const REPLY_PREFIX: &str = "CHAIN_CORE> ";

/// Runs the interactive loop until `:q` or EOF.
pub async fn run_chat<R, W>(input: R, output: &mut W, mut session: TerminalSession) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    // Boot banner is the first transcript entry.
    if let Some(banner) = session.transcript().last() {
        writeln!(output, "{}", banner.text)?;
    }
    writeln!(output, "(type :q to quit)")?;
    write!(output, "{PROMPT_PREFIX}")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == QUIT_COMMAND {
            writeln!(output, "Connection closed.")?;
            break;
        }

        if trimmed.is_empty() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        submit_line(&mut session, trimmed, output).await?;

        // /signal opens the contact form: collect its fields inline.
        if matches!(
            LocalCommand::parse(trimmed),
            Some(LocalCommand::Signal)
        ) && !collect_signal_form(&mut lines, output, &mut session)?
        {
            break; // EOF mid-form
        }

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}

/// Sends a single turn (piped stdin mode) and prints the streamed reply.
pub async fn run_single_turn<W>(
    prompt: &str,
    output: &mut W,
    mut session: TerminalSession,
) -> Result<()>
where
    W: Write,
{
    submit_line(&mut session, prompt, output).await
}

async fn submit_line<W>(
    session: &mut TerminalSession,
    trimmed: &str,
    output: &mut W,
) -> Result<()>
where
    W: Write,
{
    let is_remote = LocalCommand::parse(trimmed).is_none();
    if is_remote {
        write!(output, "{REPLY_PREFIX}")?;
        output.flush()?;
    }

    let mut printed = 0usize;
    let mut write_err: Option<std::io::Error> = None;
    let submission = session
        .submit_with(trimmed, |transcript: &Transcript| {
            if write_err.is_some() {
                return;
            }
            if let Some(reply) = transcript.typing_message() {
                let text = &reply.text;
                if text.len() > printed {
                    match write!(output, "{}", &text[printed..]).and_then(|()| output.flush()) {
                        Ok(()) => printed = text.len(),
                        Err(err) => write_err = Some(err),
                    }
                }
            }
        })
        .await?;
    if let Some(err) = write_err {
        return Err(err.into());
    }

    match submission {
        Submission::Ignored => {}
        Submission::Command(_) => {
            if let Some(message) = session.transcript().last() {
                writeln!(output, "{}", message.text)?;
            }
        }
        Submission::Reply => {
            writeln!(output)?;
        }
        Submission::Failed => {
            if printed > 0 {
                writeln!(output)?;
            }
            if let Some(message) = session.transcript().last() {
                writeln!(output, "{}", message.text)?;
            }
        }
    }

    Ok(())
}

/// Reads the three contact-form fields. Returns false on EOF.
fn collect_signal_form<I, W>(
    lines: &mut I,
    output: &mut W,
    session: &mut TerminalSession,
) -> Result<bool>
where
    I: Iterator<Item = std::io::Result<String>>,
    W: Write,
{
    let mut fields = Vec::with_capacity(3);
    for label in ["IDENTITY", "RETURN_PATH", "PAYLOAD"] {
        write!(output, "{label}> ")?;
        output.flush()?;
        match lines.next() {
            Some(line) => fields.push(line?),
            None => return Ok(false),
        }
    }

    let form = SignalForm::new(
        fields[0].trim(),
        fields[1].trim(),
        fields[2].trim(),
    );
    match session.acknowledge_signal(&form) {
        Ok(()) => {
            if let Some(message) = session.transcript().last() {
                writeln!(output, "{}", message.text)?;
            }
        }
        Err(err) => {
            writeln!(output, "SIGNAL REJECTED: {err:#}")?;
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use anyhow::Result;
    use futures_util::StreamExt;
    use futures_util::future::BoxFuture;
    use futures_util::stream;

    use chainfind_core::providers::{ConversationChannel, ProviderStream, StreamEvent};

    use super::*;

    struct ScriptedChannel {
        fragments: Vec<&'static str>,
    }

    impl ConversationChannel for ScriptedChannel {
        fn send_stream(&mut self, _text: &str) -> BoxFuture<'_, Result<ProviderStream>> {
            let mut events: Vec<_> = self
                .fragments
                .iter()
                .map(|f| {
                    Ok(StreamEvent::TextDelta {
                        text: (*f).to_string(),
                    })
                })
                .collect();
            events.push(Ok(StreamEvent::MessageCompleted));
            Box::pin(async move { Ok(stream::iter(events).boxed() as ProviderStream) })
        }

        fn record_turn(&mut self, _user: &str, _reply: &str) {}
    }

    fn scripted_session(fragments: Vec<&'static str>) -> TerminalSession {
        TerminalSession::with_channel(Box::new(ScriptedChannel { fragments }))
    }

    fn run_loop(input: &str, session: TerminalSession) -> String {
        let mut output = Vec::new();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(run_chat(Cursor::new(input.to_string()), &mut output, session))
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_quit_command_closes_session() {
        let out = run_loop(":q\n", scripted_session(vec![]));
        // The banner version comes from the core crate; the workspace
        // keeps all member versions in lockstep.
        let banner = format!("CHAIN_CORE v{}", env!("CARGO_PKG_VERSION"));
        assert!(out.contains(&banner), "got: {out}");
        assert!(out.contains("Connection closed."));
    }

    #[test]
    fn test_reply_streams_after_prefix() {
        let out = run_loop("hello\n:q\n", scripted_session(vec!["Acc", "ess ", "Granted."]));
        assert!(out.contains("CHAIN_CORE> Access Granted."));
    }

    #[test]
    fn test_help_prints_command_table() {
        let out = run_loop("/help\n:q\n", scripted_session(vec![]));
        for token in ["/help", "/signal", "/clear", "/status"] {
            assert!(out.contains(token), "missing {token}");
        }
    }

    #[test]
    fn test_signal_collects_form_and_confirms() {
        let input = "/signal\nNEO\nneo@zion.io\nwake up\n:q\n";
        let out = run_loop(input, scripted_session(vec![]));
        assert!(out.contains("IDENTITY> "));
        assert!(out.contains("RETURN_PATH> "));
        assert!(out.contains("PAYLOAD> "));
        assert!(out.contains("SIGNAL RECEIVED."));
    }

    #[test]
    fn test_signal_with_bad_email_is_rejected() {
        let input = "/signal\nNEO\nnot-an-email\nwake up\n:q\n";
        let out = run_loop(input, scripted_session(vec![]));
        assert!(out.contains("SIGNAL REJECTED:"));
    }

    #[test]
    fn test_eof_exits_cleanly() {
        let out = run_loop("/status\n", scripted_session(vec![]));
        assert!(out.contains("STATUS REPORT"));
    }

    /// Writer that fails once its byte budget is spent, like a closed pipe.
    struct ClosedPipeWriter {
        remaining: usize,
    }

    impl Write for ClosedPipeWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.len() <= self.remaining {
                self.remaining -= buf.len();
                Ok(buf.len())
            } else {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "pipe closed",
                ))
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_mid_stream_is_reported() {
        // Budget covers the reply prefix only, so the first streamed
        // fragment hits the dead pipe.
        let mut output = ClosedPipeWriter {
            remaining: REPLY_PREFIX.len(),
        };
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(run_single_turn(
            "hello",
            &mut output,
            scripted_session(vec!["Granted."]),
        ));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("pipe closed"), "got: {err:#}");
    }

    #[test]
    fn test_single_turn_prints_reply() {
        let mut output = Vec::new();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(run_single_turn(
            "hello",
            &mut output,
            scripted_session(vec!["Granted."]),
        ))
        .unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("CHAIN_CORE> Granted."));
    }
}
