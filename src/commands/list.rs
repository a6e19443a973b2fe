//! List site content

use anyhow::Result;

use crate::content::PostRepository;
use crate::Site;

/// Print the merged post list in final order
pub fn run(site: &Site) -> Result<()> {
    let repo = site.repository();
    let local = repo.list_local()?;

    let remote = match &site.config.remote_posts {
        Some(path) => PostRepository::load_remote_snapshot(site.base_dir.join(path))?,
        None => Vec::new(),
    };

    let posts = PostRepository::merge(remote, local);

    println!("Posts ({}):", posts.len());
    for post in posts {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());
        println!("  #{:<3} {} - {} [{}]", post.id, date, post.title, post.slug);
    }

    Ok(())
}
