use anyhow::Result;
use qbittorrent_webui::client::Qbit;
use qbittorrent_webui::requests::TorrentListQuery;
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let qbit = {
        let url = env::var("QBITTORRENT_URL")?;
        Qbit::builder().url(url).timeout(10_000).build()?
    };

    let username = env::var("QBITTORRENT_USERNAME")?;
    let password = env::var("QBITTORRENT_PASSWORD")?;
    qbit.login(&username, &password).await?;

    println!(
        "qBittorrent {} (WebUI API {})",
        qbit.app_version().await?,
        qbit.api_version().await?
    );

    let torrents = qbit.torrents(&TorrentListQuery::new()).await?;
    for torrent in torrents {
        println!(
            "torrent: {}, name: {}, state: {:?}, size: {}, progress: {}% {} {}",
            torrent.hash,
            torrent.name,
            torrent.state,
            torrent.calculate_size(),
            torrent.calculate_progress(),
            torrent.calculate_speed(),
            torrent.calculate_time_left()
        );
    }

    let transfer = qbit.transfer_info().await?;
    println!("transfer: {transfer:?}");

    qbit.logout().await?;

    Ok(())
}
