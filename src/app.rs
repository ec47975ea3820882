use anyhow::{Result, bail};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::api::{QueryError, SearchResponse, SearchTransport};
use crate::render::render_view;
use crate::view::{Outcome, SearchTicket, SearchView};

type PendingSearch<'a> = LocalBoxFuture<'a, (SearchTicket, Result<SearchResponse, QueryError>)>;

pub const QUIT_COMMAND: &str = ":quit";

/// Interactive loop: every input line becomes the bound query and triggers a search.
///
/// Input keeps being read while searches are outstanding, so a new line can start a
/// second search before the first one resolves. The loop ends on `:quit`, or on EOF
/// once nothing is left in flight.
pub async fn run_interactive<T, R, W>(
    view: &mut SearchView,
    transport: &T,
    input: R,
    mut output: W,
) -> Result<()>
where
    T: SearchTransport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight: FuturesUnordered<PendingSearch<'_>> = FuturesUnordered::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                if line.trim() == QUIT_COMMAND {
                    break;
                }
                view.set_query(line);
                if let Some(ticket) = view.begin_search() {
                    log::info!("searching for {:?}", ticket.query);
                    in_flight.push(
                        async move {
                            let result = transport.search(&ticket.query).await;
                            (ticket, result)
                        }
                        .boxed_local(),
                    );
                    write_frame(&mut output, view).await?;
                }
            }
            Some((ticket, result)) = in_flight.next(), if !in_flight.is_empty() => {
                if view.complete(&ticket, result) != Outcome::Stale {
                    write_frame(&mut output, view).await?;
                }
            }
            else => break,
        }
    }
    Ok(())
}

/// Runs a single search and prints the resulting view.
pub async fn run_once<T, W>(
    view: &mut SearchView,
    transport: &T,
    query: &str,
    mut output: W,
) -> Result<Outcome>
where
    T: SearchTransport,
    W: AsyncWrite + Unpin,
{
    view.set_query(query);
    let Some(outcome) = view.search(transport).await else {
        bail!("Query cannot be empty");
    };
    write_frame(&mut output, view).await?;
    Ok(outcome)
}

async fn write_frame<W: AsyncWrite + Unpin>(output: &mut W, view: &SearchView) -> Result<()> {
    output.write_all(render_view(view).as_bytes()).await?;
    output.flush().await?;
    Ok(())
}
