use elsu_vs_enemy::geometry::Rect;

#[test]
fn accessors() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.left(), 10);
    assert_eq!(r.right(), 40);
    assert_eq!(r.top(), 20);
    assert_eq!(r.bottom(), 60);
    assert_eq!(r.centerx(), 25);
    assert_eq!(r.centery(), 40);
}

#[test]
fn centerx_rounds_down_on_odd_width() {
    let r = Rect::new(0, 0, 5, 5);
    assert_eq!(r.centerx(), 2);
}

#[test]
fn overlapping_rects_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, 5, 10, 10);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn contained_rect_intersects() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(40, 40, 10, 10);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

#[test]
fn disjoint_rects_do_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(50, 50, 10, 10);
    assert!(!a.intersects(&b));
}

#[test]
fn shared_vertical_edge_does_not_intersect() {
    // a.right == b.left — touching is not overlapping
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(10, 0, 10, 10);
    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));
}

#[test]
fn shared_horizontal_edge_does_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(0, 10, 10, 10);
    assert!(!a.intersects(&b));
}

#[test]
fn one_pixel_past_edge_intersects() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(9, 0, 10, 10);
    assert!(a.intersects(&b));
}
