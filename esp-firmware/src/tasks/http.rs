// HTTP Server Task - Steuerseite und Kommandos über GET-Requests
use defmt::{Debug2Format, error, info, warn};
use embassy_net::Stack;
use embassy_net::tcp::{Error as TcpError, TcpSocket};
use embassy_time::{Duration, Timer};
use embedded_io_async::Write as _;

use crate::SharedController;
use crate::config::*;
use esp_core::{INTERNAL_ERROR_RESPONSE, RenderError};

/// Ende des Request-Headers
const HEADER_END: &[u8] = b"\r\n\r\n";

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// Eine Verbindung nach der anderen:
/// - Request lesen (bis Header-Ende, EOF oder Buffer voll)
/// - Kommando anwenden und Seite rendern (ein Lock, siehe `SharedController`)
/// - Antwort senden, Verbindung schließen (`Connection: close`)
///
/// Nur die Request-Zeile wird ausgewertet. Alles was kein bekanntes Kommando
/// ist (z.B. `/favicon.ico`) bekommt die normale Steuerseite.
#[embassy_executor::task]
pub async fn http_server_task(stack: &'static Stack<'static>, controller: &'static SharedController) {
    info!("HTTP: Server starting on port {}...", HTTP_PORT);

    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];
    let mut request = [0u8; HTTP_REQUEST_BUFFER_SIZE];

    loop {
        let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(HTTP_SOCKET_TIMEOUT_SECS)));

        if let Err(e) = socket.accept(HTTP_PORT).await {
            warn!("HTTP: Accept failed: {}", Debug2Format(&e));
            Timer::after(Duration::from_millis(500)).await;
            continue;
        }

        info!(
            "HTTP: Connection from {}",
            Debug2Format(&socket.remote_endpoint())
        );

        if let Err(e) = serve_connection(&mut socket, &mut request, controller).await {
            warn!("HTTP: Connection error: {}", Debug2Format(&e));
        }

        // FIN senden und warten bis alles raus ist, erst dann Socket verwerfen
        socket.close();
        if let Err(e) = socket.flush().await {
            warn!("HTTP: Close failed: {}", Debug2Format(&e));
        }
    }
}

/// Bedient genau einen Request auf einer offenen Verbindung
async fn serve_connection(
    socket: &mut TcpSocket<'_>,
    buffer: &mut [u8],
    controller: &SharedController,
) -> Result<(), TcpError> {
    let Some(len) = read_request(socket, buffer).await? else {
        info!("HTTP: Connection closed by peer (EOF)");
        return Ok(());
    };

    // Kommando + Rendern in einer Critical Section
    let rendered = controller.lock(|cell| {
        let mut fan = cell.borrow_mut();
        let (command, response) = fan.handle_request::<HTTP_BODY_BUFFER_SIZE>(&buffer[..len])?;
        let head = response.head()?;
        Ok::<_, RenderError>((command, *fan.state(), head, response))
    });

    match rendered {
        Ok((command, state, head, response)) => {
            info!(
                "HTTP: {} -> {} ({} bytes {})",
                command,
                state,
                response.body.len(),
                response.content_type
            );
            socket.write_all(head.as_bytes()).await?;
            socket.write_all(response.body.as_bytes()).await?;
        }
        Err(e) => {
            error!("HTTP: Render failed: {}", e);
            socket.write_all(INTERNAL_ERROR_RESPONSE).await?;
        }
    }

    socket.flush().await
}

/// Liest einen Request in `buffer`
///
/// Gibt `None` zurück wenn die Gegenseite ohne Daten schließt.
/// Passt der Request nicht in den Buffer, wird der Anfang ausgewertet.
async fn read_request(socket: &mut TcpSocket<'_>, buffer: &mut [u8]) -> Result<Option<usize>, TcpError> {
    let mut len = 0;

    loop {
        let n = socket.read(&mut buffer[len..]).await?;
        if n == 0 {
            return Ok((len > 0).then_some(len));
        }

        len += n;
        if len == buffer.len() || buffer[..len].windows(HEADER_END.len()).any(|w| w == HEADER_END) {
            return Ok(Some(len));
        }
    }
}
