// https://en.cppreference.com/w/cpp/utility/optional.html
// Like Option<T> in Rust, but keeping the C++ object layout (union storage
// plus a bool discriminant) and the C++ assignment policy: an engaged
// container is updated in place instead of being destroyed and rebuilt.

use std::{
    fmt::{ Debug, Display },
    mem::{ ManuallyDrop, MaybeUninit },
    ops::{ Deref, DerefMut }
};

// std::nullopt_t
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullOpt;

// std::nullopt
pub const NULLOPT: NullOpt = NullOpt;

#[repr(C)]
pub struct Optional<T> {
    value: MaybeUninit<T>,
    on: bool
}

impl<T> Optional<T> {
    pub fn new() -> Self {
        Self { value: MaybeUninit::uninit(), on: false }
    }

    pub fn some(value: T) -> Self {
        Self { value: MaybeUninit::new(value), on: true }
    }

    // The only two state transitions. Every mutating operation below funnels
    // through these, so the discriminant can never disagree with the cell.
    fn engage(&mut self, value: T) {
        debug_assert!(!self.on, "engaged a cell that already holds a value");
        self.value.write(value);
        self.on = true;
    }

    fn disengage(&mut self) {
        if self.on {
            unsafe { std::ptr::drop_in_place(self.value.as_mut_ptr()) };
            self.on = false;
        }
    }

    /// explicit operator bool()
    pub fn has_value(&self) -> bool { self.on }

    pub fn value(&self) -> Option<&T> {
        match self.on {
            true => Some(unsafe { self.value.assume_init_ref() }),
            false => None
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self.on {
            true => Some(unsafe { self.value.assume_init_mut() }),
            false => None
        }
    }

    /// operator=(U&&): update the live value in place when engaged, construct
    /// into the cell when empty. The live cell is never dropped and rebuilt by
    /// this path, so the contained object's address is stable across
    /// engaged-to-engaged assignments.
    pub fn assign<U: Into<T>>(&mut self, value: U) {
        let value = value.into();
        if self.on {
            unsafe { *self.value.assume_init_mut() = value };
        } else {
            self.engage(value);
        }
    }

    /// operator=(Opt&&): `other` is left empty whenever it held a value. An
    /// empty `other` empties `self` and is itself untouched.
    pub fn take_from(&mut self, other: &mut Self) {
        match other.take() {
            Some(v) => self.assign(v),
            None => self.disengage()
        }
    }

    /// Consuming move out of the container: returns the payload (if any) and
    /// leaves the container empty.
    pub fn take(&mut self) -> Option<T> {
        match self.on {
            true => {
                self.on = false;
                Some(unsafe { self.value.assume_init_read() })
            }
            false => None
        }
    }

    /// operator=(nullopt): drop the payload if engaged. Idempotent.
    pub fn reset(&mut self) { self.disengage(); }

    /// operator*() on an rvalue. Precondition: the container must hold a
    /// value; checked with a debug assertion only.
    pub fn into_inner(self) -> T {
        debug_assert!(self.on, "moved out of an empty Optional");
        let this = ManuallyDrop::new(self);
        unsafe { this.value.as_ptr().read() }
    }

    /// operator->(). The pointer only points at a live value while the
    /// container is engaged.
    pub fn as_ptr(&self) -> *const T { self.value.as_ptr() }

    pub fn as_mut_ptr(&mut self) -> *mut T { self.value.as_mut_ptr() }
}

impl<T> Drop for Optional<T> {
    fn drop(&mut self) {
        self.disengage();
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self { Self::new() }
}

/// operator*() on an lvalue. Precondition: the container must hold a value;
/// checked with a debug assertion only.
impl<T> Deref for Optional<T> {
    type Target = T;
    fn deref(&self) -> &T {
        debug_assert!(self.on, "dereferenced an empty Optional");
        unsafe { self.value.assume_init_ref() }
    }
}

impl<T> DerefMut for Optional<T> {
    fn deref_mut(&mut self) -> &mut T {
        debug_assert!(self.on, "dereferenced an empty Optional");
        unsafe { self.value.assume_init_mut() }
    }
}

impl<T> Clone for Optional<T>
where T: Clone {
    fn clone(&self) -> Self {
        match self.value() {
            Some(v) => Self::some(v.clone()),
            None => Self::new()
        }
    }

    // operator=(const Opt&): both engaged updates the payload in place,
    // otherwise engage or disengage to match `source`.
    fn clone_from(&mut self, source: &Self) {
        match source.value() {
            Some(v) => {
                if self.on {
                    unsafe { self.value.assume_init_mut().clone_from(v) };
                } else {
                    self.engage(v.clone());
                }
            }
            None => self.disengage()
        }
    }
}

impl<T> From<NullOpt> for Optional<T> {
    fn from(_: NullOpt) -> Self { Self::new() }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::some(v),
            None => Self::new()
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(mut value: Optional<T>) -> Self { value.take() }
}

impl<T> PartialEq for Optional<T>
where T: PartialEq {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<T> Eq for Optional<T>
where T: Eq {}

impl<T> Debug for Optional<T>
where T: Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "Some({:?})", v),
            None => write!(f, "None"),
        }
    }
}

impl<T> Display for Optional<T>
where T: Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(v) => write!(f, "Some({})", v),
            None => write!(f, "None"),
        }
    }
}
