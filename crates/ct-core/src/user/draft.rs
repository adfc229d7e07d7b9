use super::User;

/// Single field edit coming from the profile editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEdit {
    UserName(String),
    PhoneNumber(String),
    Ward(String),
    Street(String),
    HouseNumber(String),
}

/// Working copy of a profile being edited.
///
/// Edits only touch the draft; nothing is persisted until the draft is
/// submitted through the coordinator's `update_profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    user: User,
}

impl ProfileDraft {
    pub fn from_user(user: User) -> Self {
        Self { user }
    }

    pub fn apply(&mut self, edit: ProfileEdit) {
        match edit {
            ProfileEdit::UserName(value) => self.user.user_name = value,
            ProfileEdit::PhoneNumber(value) => self.user.phone_number = value,
            ProfileEdit::Ward(value) => self.user.address.ward = value,
            ProfileEdit::Street(value) => self.user.address.street = value,
            ProfileEdit::HouseNumber(value) => self.user.address.house_number = value,
        }
    }

    pub fn with(mut self, edit: ProfileEdit) -> Self {
        self.apply(edit);
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{Address, UserId};

    #[test]
    fn test_edits_update_only_their_field() {
        let original = User {
            id: UserId::from("u-1"),
            email: "a@x.com".to_string(),
            address: Address {
                ward: "Ward 3".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let draft = ProfileDraft::from_user(original.clone())
            .with(ProfileEdit::PhoneNumber("0123456789".to_string()))
            .with(ProfileEdit::Street("Hai Ba Trung".to_string()));

        let user = draft.into_user();
        assert_eq!(user.phone_number, "0123456789");
        assert_eq!(user.address.street, "Hai Ba Trung");
        assert_eq!(user.address.ward, "Ward 3");
        assert_eq!(user.email, original.email);
        assert_eq!(user.id, original.id);
    }

    #[test]
    fn test_address_edits_on_blank_profile() {
        let mut draft = ProfileDraft::default();
        draft.apply(ProfileEdit::HouseNumber("42".to_string()));
        draft.apply(ProfileEdit::UserName("Minh".to_string()));

        assert_eq!(draft.user().address.house_number, "42");
        assert_eq!(draft.user().user_name, "Minh");
        assert_eq!(draft.user().address.ward, "");
    }
}
