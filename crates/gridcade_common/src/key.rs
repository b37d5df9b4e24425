/// Logical key set shared by all frontends.
///
/// Frontends map their native keycodes onto this enum at the boundary so
/// the games never see platform key codes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    None,
    Num1,
    Num2,
    Num3,
    Num4,
    Q,
    W,
    E,
    R,
    A,
    S,
    D,
    F,
    Z,
    X,
    C,
    V,
    P,
    Space,
    Left,
    Right,
    Up,
    Down,
    Escape,
}
