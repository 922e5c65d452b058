use spacedodge::geometry::*;

#[test]
fn test_rect_edges() {
    let r = Rect::new(3, 4, 10, 20);
    assert_eq!(r.right(), 13);
    assert_eq!(r.bottom(), 24);
}

#[test]
fn test_overlapping_rects_intersect() {
    let ship = Rect::new(100, 295, 16, 16);
    let rock = Rect::new(110, 290, 8, 8);
    assert!(ship.intersects(&rock));
    assert!(rock.intersects(&ship));
}

#[test]
fn test_edge_adjacent_rects_do_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
    assert!(!a.intersects(&Rect::new(10, 10, 5, 5)));
}

#[test]
fn test_one_pixel_overlap_intersects() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.intersects(&Rect::new(9, 9, 5, 5)));
}

#[test]
fn test_degenerate_rects_never_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(2, 2, 0, 5)));
    assert!(!a.intersects(&Rect::new(2, 2, 5, -1)));
    assert!(!Rect::new(2, 2, 0, 0).intersects(&a));
}
