use clap::{Parser, Subcommand};
use roster_application::UserService;
use roster_core::AppResult;
use roster_domain::{OrganizationId, SpaceId, UserId, UserRecord};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Manage platform users and their organization and space roles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One user or role operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Look up a user by username
    FindUser { username: String },
    /// List the users holding an organization role
    OrgUsers { org_id: OrganizationId, role: String },
    /// List the users holding a space role
    SpaceUsers { space_id: SpaceId, role: String },
    /// Create an identity account and register it on the platform
    CreateUser { username: String, password: String },
    /// Delete a user from the platform and the identity service
    DeleteUser { user_id: UserId },
    /// Grant an organization role
    SetOrgRole {
        user_id: UserId,
        org_id: OrganizationId,
        role: String,
    },
    /// Revoke an organization role
    UnsetOrgRole {
        user_id: UserId,
        org_id: OrganizationId,
        role: String,
    },
    /// Grant a space role, adding organization membership first
    SetSpaceRole {
        user_id: UserId,
        space_id: SpaceId,
        org_id: OrganizationId,
        role: String,
    },
    /// Revoke a space role
    UnsetSpaceRole {
        user_id: UserId,
        space_id: SpaceId,
        role: String,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FindUser { .. } => "find-user",
            Self::OrgUsers { .. } => "org-users",
            Self::SpaceUsers { .. } => "space-users",
            Self::CreateUser { .. } => "create-user",
            Self::DeleteUser { .. } => "delete-user",
            Self::SetOrgRole { .. } => "set-org-role",
            Self::UnsetOrgRole { .. } => "unset-org-role",
            Self::SetSpaceRole { .. } => "set-space-role",
            Self::UnsetSpaceRole { .. } => "unset-space-role",
        }
    }
}

pub async fn run(service: &UserService, command: Command) -> AppResult<()> {
    match command {
        Command::FindUser { username } => {
            let user = service.find_by_username(username.as_str()).await?;
            print_users(std::slice::from_ref(&user));
        }
        Command::OrgUsers { org_id, role } => {
            let users = service
                .list_users_in_org_for_role_name(&org_id, role.as_str())
                .await?;
            print_users(users.as_slice());
        }
        Command::SpaceUsers { space_id, role } => {
            let users = service
                .list_users_in_space_for_role_name(&space_id, role.as_str())
                .await?;
            print_users(users.as_slice());
        }
        Command::CreateUser { username, password } => {
            let user_id = service
                .create(username.as_str(), password.as_str())
                .await?;
            println!("{user_id}");
        }
        Command::DeleteUser { user_id } => service.delete(&user_id).await?,
        Command::SetOrgRole {
            user_id,
            org_id,
            role,
        } => {
            service
                .set_org_role_by_name(&user_id, &org_id, role.as_str())
                .await?;
        }
        Command::UnsetOrgRole {
            user_id,
            org_id,
            role,
        } => {
            service
                .unset_org_role_by_name(&user_id, &org_id, role.as_str())
                .await?;
        }
        Command::SetSpaceRole {
            user_id,
            space_id,
            org_id,
            role,
        } => {
            service
                .set_space_role_by_name(&user_id, &space_id, &org_id, role.as_str())
                .await?;
        }
        Command::UnsetSpaceRole {
            user_id,
            space_id,
            role,
        } => {
            service
                .unset_space_role_by_name(&user_id, &space_id, role.as_str())
                .await?;
        }
    }

    info!("done");
    Ok(())
}

fn print_users(users: &[UserRecord]) {
    if users.is_empty() {
        println!("no users found");
        return;
    }

    for user in users {
        let admin = if user.is_admin { " (admin)" } else { "" };
        println!("{}\t{}{admin}", user.id, user.display_name());
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn set_space_role_takes_four_arguments() {
        let cli = Cli::try_parse_from([
            "roster",
            "set-space-role",
            "u1",
            "space-1",
            "org-1",
            "space-developer",
        ]);

        match cli.map(|cli| cli.command) {
            Ok(Command::SetSpaceRole {
                user_id,
                space_id,
                org_id,
                role,
            }) => {
                assert_eq!(user_id.as_str(), "u1");
                assert_eq!(space_id.as_str(), "space-1");
                assert_eq!(org_id.as_str(), "org-1");
                assert_eq!(role, "space-developer");
            }
            other => panic!("expected set-space-role, got {other:?}"),
        }
    }

    #[test]
    fn subcommand_names_match_reported_names() {
        let cases: [&[&str]; 4] = [
            &["roster", "find-user", "alice"],
            &["roster", "org-users", "org-1", "org-manager"],
            &["roster", "delete-user", "u1"],
            &["roster", "unset-space-role", "u1", "space-1", "space-auditor"],
        ];

        for case in cases {
            let parsed = Cli::try_parse_from(case.iter().copied());
            assert_eq!(
                parsed.map(|cli| cli.command.name()).ok(),
                Some(case[1]),
                "{case:?}"
            );
        }
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["roster", "set-org-role", "u1", "org-1"]).is_err());
        assert!(Cli::try_parse_from(["roster"]).is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["roster", "spaces"]).is_err());
    }

    #[test]
    fn invalid_identifiers_are_rejected() {
        assert!(Cli::try_parse_from(["roster", "delete-user", " "]).is_err());
        assert!(Cli::try_parse_from(["roster", "org-users", "a/b", "org-user"]).is_err());
    }
}
