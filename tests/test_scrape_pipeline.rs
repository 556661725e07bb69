use cocktail_catalog::{
    refresh_snapshot, Catalog, CatalogBuilder, CatalogConfig, CatalogError, FetchError,
    RequestFetcher,
};
use std::fs;
use std::path::PathBuf;

fn listing_html(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<div class="blog_list_item">
                    <h3>{name}</h3>
                    <p>A short teaser.</p>
                    <a class="btn btn-readmore" href="{href}">Read more</a>
                </div>"#
            )
        })
        .collect();
    format!(
        r#"<html><body><div class="blog_list_items">{items}</div></body></html>"#
    )
}

fn detail_html(name: &str, ingredients: &str, garnish: &str) -> String {
    format!(
        r#"<html><body>
            <div class="col-sm-9">
                <h1>{name}</h1>
                <img class="alignnone" src="/uploads/{name}.png">
                <p>INGREDIENTS{ingredients}

METHODShake and strain.

GARNISH{garnish}</p>
            </div>
        </body></html>"#
    )
}

fn snapshot_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cocktail-catalog-{}-{}.json",
        std::process::id(),
        name
    ))
}

fn mock_site(server: &mut mockito::Server, paloma_status: usize) -> Vec<mockito::Mock> {
    vec![
        server
            .mock("GET", "/iba-cocktails")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(listing_html(&[
                ("DAIQUIRI", "/iba-official-cocktails/daiquiri/"),
                ("gimlet", "/iba-official-cocktails/gimlet-old/"),
            ]))
            .create(),
        server
            .mock("GET", "/contemporary-classics")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(listing_html(&[
                ("Gimlet", "/cocktails/gimlet/"),
                ("Paloma", "/cocktails/paloma/"),
            ]))
            .create(),
        server
            .mock("GET", "/iba-official-cocktails/daiquiri/")
            .with_status(200)
            .with_body(detail_html("Daiquiri", "60 ml White rum\n20 ml Lime juice", "Lime wheel"))
            .create(),
        server
            .mock("GET", "/cocktails/gimlet/")
            .with_status(200)
            .with_body(detail_html("Gimlet", "60 ml Gin\n15 ml Lime cordial", "Lime twist"))
            .create(),
        server
            .mock("GET", "/cocktails/paloma/")
            .with_status(paloma_status)
            .with_body(detail_html("Paloma", "50 ml Tequila\nGrapefruit soda", "Lime slice"))
            .create(),
    ]
}

fn builder(server: &mockito::Server) -> CatalogBuilder<RequestFetcher> {
    CatalogBuilder::new(RequestFetcher::new(None).unwrap())
        .base_url(format!("{}/", server.url()))
        .pages(["iba-cocktails", "contemporary-classics"])
        .category("iba-official-cocktails", "The Unforgettables")
        .category("cocktails", "Contemporary Classics")
}

#[test]
fn test_scrape_save_and_load() {
    let mut server = mockito::Server::new();
    let _mocks = mock_site(&mut server, 200);

    let catalog = builder(&server).build().unwrap();

    let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Daiquiri", "Gimlet", "Paloma"]);

    let gimlet = catalog.find_by_name("gimlet").unwrap();
    assert_eq!(gimlet.category, "Contemporary Classics");
    assert_eq!(gimlet.ingredients, vec!["60 ml Gin", "15 ml Lime cordial"]);
    assert_eq!(gimlet.source_link, format!("{}/cocktails/gimlet/", server.url()));

    let daiquiri = catalog.find_by_name("DAIQUIRI").unwrap();
    assert_eq!(daiquiri.category, "The Unforgettables");
    assert_eq!(daiquiri.preparation, "Shake and strain.");
    assert_eq!(daiquiri.garnish, "Lime wheel");
    assert_eq!(daiquiri.image_url, "/uploads/Daiquiri.png");

    let path = snapshot_path("roundtrip");
    catalog.save(&path).unwrap();
    let loaded = Catalog::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, catalog);
}

#[test]
fn test_failed_detail_page_aborts_build() {
    let mut server = mockito::Server::new();
    let _mocks = mock_site(&mut server, 500);

    let path = snapshot_path("untouched");
    fs::write(&path, "[]").unwrap();

    let result = builder(&server).build().and_then(|catalog| catalog.save(&path));

    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(matches!(
        result,
        Err(CatalogError::Fetch(FetchError::Status { status: 500, .. }))
    ));
    assert_eq!(contents, "[]");
}

#[test]
fn test_listing_without_container_aborts_build() {
    let mut server = mockito::Server::new();
    let _listing = server
        .mock("GET", "/iba-cocktails")
        .with_status(200)
        .with_body("<html><body><p>Site under maintenance</p></body></html>")
        .create();

    let err = builder(&server).build().unwrap_err();
    match err {
        CatalogError::Parse { url, .. } => {
            assert_eq!(url, format!("{}/iba-cocktails", server.url()))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_refresh_snapshot_from_config() {
    let mut server = mockito::Server::new();
    let _mocks = mock_site(&mut server, 200);

    let config = CatalogConfig {
        base_url: format!("{}/", server.url()),
        pages: vec!["iba-cocktails".to_string(), "contemporary-classics".to_string()],
        snapshot_path: snapshot_path("refresh"),
        timeout: 5,
        ..CatalogConfig::default()
    };

    let catalog = refresh_snapshot(&config).unwrap();
    let loaded = Catalog::load(&config.snapshot_path);
    fs::remove_file(&config.snapshot_path).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(loaded.unwrap(), catalog);
    assert_eq!(
        catalog.categories(),
        vec!["The Unforgettables", "Contemporary Classics"]
    );
}
