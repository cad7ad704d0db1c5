/// Duplicate an [item](https://doc.rust-lang.org/nightly/reference/items.html) `$imp` for each type
/// `$Ty`, making it available within `$imp` under the alias `$Alias`.
///
/// Please use traits instead of this, where reasonable.
#[macro_export]
macro_rules! item_with {
    {$Alias:ident: $($Ty:ty),+ => $imp:item} => {
        $(
            const _: () = { // anonymous module
                type $Alias = $Ty;
                $imp
            };
        )+
    };
}

#[cfg(test)]
mod tests {
    trait Width {
        const BYTES: usize;
    }

    item_with! {T: u8, u16, u32, f64 => impl Width for T {
        const BYTES: usize = std::mem::size_of::<T>();
    }}

    #[test]
    fn item_with_expands_per_type() {
        assert_eq!(<u8 as Width>::BYTES, 1);
        assert_eq!(<u16 as Width>::BYTES, 2);
        assert_eq!(<u32 as Width>::BYTES, 4);
        assert_eq!(<f64 as Width>::BYTES, 8);
    }
}
