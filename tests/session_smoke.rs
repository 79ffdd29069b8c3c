//! Smoke tests for the async session facade

use posterkit::{EditTarget, GuestTextField, Studio, TextTarget, TitleFill};

#[tokio::test]
async fn session_drives_edits_and_exports() {
    let studio = Studio::new(None).await.expect("Failed to create studio");
    let session = studio.session();

    session
        .commit_text(TextTarget::Field("title".into()), "NEON NIGHTS")
        .await
        .expect("commit title");
    session
        .commit_text(
            TextTarget::Guest {
                id: 2,
                field: GuestTextField::Title,
            },
            "Curator",
        )
        .await
        .expect("commit guest title");

    let id = session.add_guest().await.expect("add guest");
    assert_eq!(id, 7);

    let doc = session.snapshot().await.expect("snapshot");
    assert_eq!(doc.texts.title, "NEON NIGHTS");
    assert_eq!(doc.guests.iter().find(|g| g.id == 2).unwrap().title, "Curator");
    assert_eq!(doc.guest_count(), 7);

    session
        .set_title_fill(TitleFill::Solid([240, 240, 255, 255]))
        .await
        .expect("restyle title");

    let artifact = session
        .export_png(None)
        .await
        .expect("export")
        .expect("artifact");
    assert_eq!(artifact.file_name, "poster.png");
    assert_eq!(&artifact.bytes[0..8], b"\x89PNG\r\n\x1a\n");

    studio.close().await.expect("close");
}

#[tokio::test]
async fn capacity_errors_surface_through_the_facade() {
    let studio = Studio::new(None).await.expect("Failed to create studio");
    let session = studio.session();

    for _ in 0..3 {
        session.add_guest().await.expect("room for guest");
    }
    let err = session.add_guest().await.expect_err("grid is full");
    assert_eq!(err.to_string(), "Maximum of 9 guests allowed");

    // The grid is untouched and removal still walks back from the end.
    assert_eq!(session.snapshot().await.unwrap().guest_count(), 9);
    assert_eq!(session.remove_guest().await.unwrap(), Some(9));

    studio.close().await.expect("close");
}

#[tokio::test]
async fn picked_image_lands_on_the_pending_target() {
    use image::{DynamicImage, RgbaImage};
    use std::io::Cursor;

    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        3,
        3,
        image::Rgba([50, 60, 70, 255]),
    ));
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .expect("encode fixture");
    let path = std::env::temp_dir().join("posterkit_session_pick.png");
    std::fs::write(&path, &png).expect("write fixture");

    let studio = Studio::new(None).await.expect("Failed to create studio");
    let session = studio.session();

    session
        .begin_image_edit(EditTarget::Guest(4))
        .await
        .expect("begin edit");
    session.pick_image(path.clone()).await.expect("pick image");

    let doc = session.snapshot().await.expect("snapshot");
    let guest = doc.guests.iter().find(|g| g.id == 4).unwrap();
    assert!(guest.image.is_inline());

    // A pick with nothing pending is absorbed quietly.
    session.commit_image(png).await.expect("defensive no-op");

    std::fs::remove_file(&path).ok();
    studio.close().await.expect("close");
}

#[tokio::test]
async fn undecodable_pick_surfaces_and_clears_the_target() {
    let studio = Studio::new(None).await.expect("Failed to create studio");
    let session = studio.session();

    session
        .begin_image_edit(EditTarget::Poster)
        .await
        .expect("begin edit");
    let err = session
        .commit_image(b"not an image".to_vec())
        .await
        .expect_err("undecodable");
    assert!(err.to_string().starts_with("Image decode failed"));

    // Target was cleared: a follow-up commit is a no-op, not a misdirected
    // mutation.
    let before = session.snapshot().await.expect("snapshot");
    session
        .commit_image(b"still not an image".to_vec())
        .await
        .expect("no pending target");
    assert_eq!(session.snapshot().await.expect("snapshot"), before);

    studio.close().await.expect("close");
}
